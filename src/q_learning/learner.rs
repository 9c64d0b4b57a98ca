//! Tabular Q-learning agent for the gridworld
//!
//! Each episode starts from a uniformly random cell and runs until the agent
//! bumps into a wall (the only way to stay in place) or the step cap is hit.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    config::QLearningConfig,
    q_table::ActionValueTable,
    report::{PolicyReport, ReportConfig},
};
use crate::{
    Error, Result,
    gridworld::{Action, GridState, GridWorld, Transition},
    ports::TrainingObserver,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Why an episode stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEnd {
    /// The agent hit the edge and stayed where it was
    WallCollision,
    /// The per-episode step cap was reached
    StepLimit,
}

/// Statistics for a single episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub start: GridState,
    pub steps: usize,
    pub total_reward: f64,
    pub teleports: usize,
    pub end: EpisodeEnd,
}

/// Aggregate statistics for a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub total_steps: usize,
    pub total_reward: f64,
    pub wall_collisions: usize,
    pub teleports: usize,
}

impl TrainingSummary {
    fn record(&mut self, stats: &EpisodeStats) {
        self.episodes += 1;
        self.total_steps += stats.steps;
        self.total_reward += stats.total_reward;
        self.teleports += stats.teleports;
        if stats.end == EpisodeEnd::WallCollision {
            self.wall_collisions += 1;
        }
    }

    /// Average episode length
    pub fn mean_steps(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.episodes as f64
        }
    }

    /// Average undiscounted return per episode
    pub fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }
}

/// Q-learning agent that owns its environment and action-value table.
#[derive(Debug, Clone)]
pub struct QLearner {
    env: GridWorld,
    config: QLearningConfig,
    table: ActionValueTable,
    rng: StdRng,
}

impl QLearner {
    /// Create a learner with a zeroed table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `config` is invalid.
    pub fn new(env: GridWorld, config: QLearningConfig) -> Result<Self> {
        config.validate()?;
        let table = ActionValueTable::new(env.rows(), env.cols());
        let rng = build_rng(config.seed);
        Ok(Self {
            env,
            config,
            table,
            rng,
        })
    }

    pub fn env(&self) -> &GridWorld {
        &self.env
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Learned action values
    pub fn table(&self) -> &ActionValueTable {
        &self.table
    }

    /// Consume the learner and keep only the learned table
    pub fn into_table(self) -> ActionValueTable {
        self.table
    }

    /// ε-greedy action selection
    pub fn choose_action(&mut self, state: GridState) -> Action {
        if self.rng.random::<f64>() < self.config.epsilon {
            // Explore: random action
            Action::ALL[self.rng.random_range(0..Action::ALL.len())]
        } else {
            // Exploit: greedy action, ties broken by priority
            self.config.policy.select(self.table.values(state))
        }
    }

    /// Apply the TD update for one observed transition and return the TD error.
    pub fn update(&mut self, state: GridState, action: Action, transition: Transition) -> f64 {
        self.table.q_learning_update(
            state,
            action,
            transition.reward,
            transition.next_state,
            self.config.alpha,
            self.config.gamma,
        )
    }

    fn random_state(&mut self) -> GridState {
        GridState::new(
            self.rng.random_range(0..self.env.rows()),
            self.rng.random_range(0..self.env.cols()),
        )
    }

    /// Run one episode from a uniformly random start cell
    pub fn run_episode(&mut self) -> Result<EpisodeStats> {
        let start = self.random_state();
        self.run_episode_from(start)
    }

    /// Run one episode from `start`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `start` is off the grid.
    pub fn run_episode_from(&mut self, start: GridState) -> Result<EpisodeStats> {
        if !self.env.contains(start) {
            return Err(Error::config(format!(
                "episode start {} lies outside the {}x{} grid",
                start,
                self.env.rows(),
                self.env.cols()
            )));
        }

        let mut state = start;
        let mut stats = EpisodeStats {
            start,
            steps: 0,
            total_reward: 0.0,
            teleports: 0,
            end: EpisodeEnd::StepLimit,
        };

        for _ in 0..self.config.max_steps {
            let action = self.choose_action(state);
            let teleported = self.env.special_cell_at(state).is_some();
            let transition = self.env.step(state, action);
            self.update(state, action, transition);

            stats.steps += 1;
            stats.total_reward += transition.reward;
            if teleported {
                stats.teleports += 1;
            }

            if transition.next_state == state {
                stats.end = EpisodeEnd::WallCollision;
                break;
            }
            state = transition.next_state;
        }

        Ok(stats)
    }

    /// Train for the configured number of episodes
    pub fn train(&mut self) -> Result<TrainingSummary> {
        let mut silent: Vec<Box<dyn TrainingObserver>> = Vec::new();
        self.train_with_observer(&mut silent)
    }

    /// Train while reporting every episode to `observer`
    pub fn train_with_observer(
        &mut self,
        observer: &mut dyn TrainingObserver,
    ) -> Result<TrainingSummary> {
        debug!(
            episodes = self.config.episodes,
            max_steps = self.config.max_steps,
            alpha = self.config.alpha,
            gamma = self.config.gamma,
            epsilon = self.config.epsilon,
            "starting Q-learning"
        );
        observer.on_training_start(self.config.episodes)?;

        let mut summary = TrainingSummary::default();
        for episode in 1..=self.config.episodes {
            let stats = self.run_episode()?;
            summary.record(&stats);
            observer.on_episode_end(episode, &stats)?;
        }

        debug!(
            total_steps = summary.total_steps,
            wall_collisions = summary.wall_collisions,
            "Q-learning finished"
        );
        observer.on_training_end(&summary)?;
        Ok(summary)
    }

    /// Report the learned table with the same tie-break policy used for
    /// action selection, plus the display overrides in `config`.
    pub fn report(&self, config: &ReportConfig) -> Result<PolicyReport> {
        PolicyReport::evaluate(&self.table, &self.env, &self.config.policy, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::GridWorldConfig;

    fn learner(config: QLearningConfig) -> QLearner {
        QLearner::new(GridWorld::default(), config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = QLearningConfig::default().with_alpha(2.0);
        assert!(QLearner::new(GridWorld::default(), config).is_err());
    }

    #[test]
    fn test_table_matches_grid() {
        let env = GridWorld::new(GridWorldConfig::new(3, 3)).unwrap();
        let learner = QLearner::new(env, QLearningConfig::default()).unwrap();
        assert_eq!(learner.table().rows(), 3);
        assert_eq!(learner.table().cols(), 3);
    }

    #[test]
    fn test_greedy_choice_uses_priority_on_fresh_table() {
        let mut learner = learner(QLearningConfig::default().with_epsilon(0.0).with_seed(1));
        for state in GridWorld::default().states() {
            assert_eq!(learner.choose_action(state), Action::North);
        }
    }

    #[test]
    fn test_greedy_choice_follows_values() {
        let mut learner = learner(QLearningConfig::default().with_epsilon(0.0).with_seed(1));
        let state = GridState::new(2, 2);
        learner.table.set(state, Action::South, 0.3);
        assert_eq!(learner.choose_action(state), Action::South);
    }

    #[test]
    fn test_full_exploration_uses_every_action() {
        let mut learner = learner(QLearningConfig::default().with_epsilon(1.0).with_seed(3));
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[learner.choose_action(GridState::new(2, 2)).index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_greedy_episode_from_top_row_hits_wall_immediately() {
        let mut learner = learner(QLearningConfig::default().with_epsilon(0.0).with_seed(5));
        let start = GridState::new(0, 0);
        let stats = learner.run_episode_from(start).unwrap();

        assert_eq!(stats.steps, 1);
        assert_eq!(stats.end, EpisodeEnd::WallCollision);
        assert_eq!(stats.total_reward, -1.0);
        // 0 + 0.2 * (-1 + 0.9 * 0 - 0)
        assert!((learner.table().get(start, Action::North) + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_episode_walks_north_to_wall() {
        let mut learner = learner(QLearningConfig::default().with_epsilon(0.0).with_seed(5));
        let stats = learner.run_episode_from(GridState::new(3, 0)).unwrap();

        // (3,0) -> (2,0) -> (1,0) -> (0,0) -> wall
        assert_eq!(stats.steps, 4);
        assert_eq!(stats.end, EpisodeEnd::WallCollision);
    }

    #[test]
    fn test_teleport_episode_counts_teleports() {
        let mut learner = learner(QLearningConfig::default().with_epsilon(0.0).with_seed(5));
        let stats = learner.run_episode_from(GridState::new(0, 1)).unwrap();

        // Teleport to (4,1), then north x4 back to A, which teleports again.
        assert!(stats.teleports >= 1);
        assert!(stats.total_reward >= 10.0);
        assert!(learner.table().get(GridState::new(0, 1), Action::North) > 0.0);
    }

    #[test]
    fn test_step_cap() {
        let mut learner = learner(
            QLearningConfig::default()
                .with_epsilon(0.0)
                .with_max_steps(3)
                .with_seed(5),
        );
        let stats = learner.run_episode_from(GridState::new(4, 0)).unwrap();
        assert_eq!(stats.steps, 3);
        assert_eq!(stats.end, EpisodeEnd::StepLimit);
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let config = QLearningConfig::default().with_episodes(50).with_seed(11);
        let mut a = learner(config.clone());
        let mut b = learner(config);
        let summary_a = a.train().unwrap();
        let summary_b = b.train().unwrap();

        assert_eq!(summary_a, summary_b);
        assert_eq!(a.table(), b.table());
        assert_eq!(summary_a.episodes, 50);
    }

    #[test]
    fn test_off_grid_start_is_rejected() {
        let mut learner = learner(QLearningConfig::default().with_seed(5));
        let err = learner.run_episode_from(GridState::new(7, 7)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert_eq!(learner.table(), &ActionValueTable::new(5, 5));
    }

    #[derive(Default)]
    struct Counting {
        started: Option<usize>,
        episodes: Vec<usize>,
        finished: bool,
    }

    impl TrainingObserver for Counting {
        fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
            self.started = Some(total_episodes);
            Ok(())
        }

        fn on_episode_end(&mut self, episode: usize, _stats: &EpisodeStats) -> Result<()> {
            self.episodes.push(episode);
            Ok(())
        }

        fn on_training_end(&mut self, summary: &TrainingSummary) -> Result<()> {
            self.finished = summary.episodes == self.episodes.len();
            Ok(())
        }
    }

    #[test]
    fn test_train_matches_observed_training() {
        let config = QLearningConfig::default().with_episodes(30).with_seed(21);
        let mut plain = learner(config.clone());
        let mut observed = learner(config);

        let mut counting = Counting::default();
        let summary_plain = plain.train().unwrap();
        let summary_observed = observed.train_with_observer(&mut counting).unwrap();

        assert_eq!(summary_plain, summary_observed);
        assert_eq!(plain.table(), observed.table());
        assert_eq!(counting.started, Some(30));
        assert_eq!(counting.episodes, (1..=30).collect::<Vec<_>>());
        assert!(counting.finished);
    }

    #[test]
    fn test_report_uses_learning_policy() {
        let policy = QLearningConfig::default().policy.with_priority(vec![
            Action::South,
            Action::East,
            Action::West,
            Action::North,
        ]);
        let mut learner = learner(
            QLearningConfig::default()
                .with_epsilon(0.0)
                .with_policy(policy)
                .with_seed(1),
        );

        let state = GridState::new(2, 2);
        let chosen = learner.choose_action(state);
        let report = learner.report(&ReportConfig::default()).unwrap();
        assert_eq!(chosen, Action::South);
        assert_eq!(report.cell(state).unwrap().action, chosen);
    }
}
