//! Environment dynamics and end-to-end Q-learning checks

use playlab::{
    config::ExperimentConfig,
    gridworld::{Action, GridState, GridWorld},
    q_learning::{PolicyReport, QLearner, QLearningConfig, ReportConfig},
};

mod dynamics {
    use super::*;

    #[test]
    fn test_teleport_cells_ignore_action() {
        let env = GridWorld::default();
        for action in Action::ALL {
            let a = env.step(GridState::new(0, 1), action);
            assert_eq!(a.next_state, GridState::new(4, 1));
            assert_eq!(a.reward, 10.0);

            let b = env.step(GridState::new(0, 3), action);
            assert_eq!(b.next_state, GridState::new(2, 3));
            assert_eq!(b.reward, 5.0);
        }
    }

    #[test]
    fn test_edges_bounce_with_penalty() {
        let env = GridWorld::default();
        for state in env.states() {
            if env.special_cell_at(state).is_some() {
                continue;
            }
            for action in Action::ALL {
                let t = env.step(state, action);
                assert!(env.contains(t.next_state));
                if t.next_state == state {
                    assert_eq!(t.reward, -1.0);
                } else {
                    assert_eq!(t.reward, 0.0);
                }
            }
        }
    }
}

mod learning {
    use super::*;

    fn trained(seed: u64) -> (GridWorld, QLearner) {
        let env = GridWorld::default();
        let mut learner =
            QLearner::new(env.clone(), QLearningConfig::default().with_seed(seed)).unwrap();
        learner.train().unwrap();
        (env, learner)
    }

    #[test]
    fn test_teleport_cells_are_most_valuable() {
        let (_, learner) = trained(42);
        let table = learner.table();
        let far = table.max_value(GridState::new(3, 3));
        assert!(table.max_value(GridState::new(0, 1)) > far);
        assert!(table.max_value(GridState::new(0, 3)) > far);
        assert!(table.max_value(GridState::new(0, 1)) > 0.0);
    }

    #[test]
    fn test_report_covers_every_cell_without_mutating() {
        let (env, learner) = trained(7);
        let before = learner.table().clone();
        let config = ReportConfig::for_grid(&env);

        let first = learner.report(&config).unwrap();
        let second = PolicyReport::evaluate(
            learner.table(),
            &env,
            &learner.config().policy,
            &config,
        )
        .unwrap();

        assert_eq!(learner.table(), &before);
        assert_eq!(first, second);
        assert_eq!(first.cells.len(), 25);
        assert_eq!(first.render_arrows().lines().count(), 5);
    }

    #[test]
    fn test_configured_priority_reaches_report() {
        let config = ExperimentConfig::from_json(
            r#"{"learning": {"epsilon": 0.0, "episodes": 0,
                "policy": {"priority": ["south", "east", "west", "north"]}}}"#,
        )
        .unwrap();
        let env = GridWorld::new(config.grid.clone()).unwrap();
        let mut learner = QLearner::new(env.clone(), config.learning.clone()).unwrap();
        learner.train().unwrap();

        let report = learner.report(&config.report_config(&env)).unwrap();
        for state in env.states() {
            let shown = report.cell(state).unwrap().action;
            if state == GridState::new(4, 4) {
                assert_eq!(shown, Action::West);
            } else {
                assert_eq!(shown, learner.choose_action(state));
                assert_eq!(shown, Action::South);
            }
        }
    }
}
