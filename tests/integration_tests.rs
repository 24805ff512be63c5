//! Integration tests for the session lifecycle

use ramen_rush::core::{progression, ConfigError, EngineConfig, GameState};
use ramen_rush::types::{GameAction, Orientation, Position};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_session_lifecycle() {
    init_logger();

    let mut state = GameState::new(EngineConfig::default());
    assert!(!state.started());

    state.start();
    assert!(state.started());
    assert_eq!(state.level(), 1);
    assert_eq!(state.demands().len(), 4);
    assert!(state.grid().is_full());
    assert_eq!(state.pool(), &progression::STARTER_POOL[..]);
    assert!(state.previews().iter().all(|p| p.is_some()));
    assert_eq!(state.coins(), 0);
}

#[test]
fn test_level_transition_resets_board() {
    init_logger();

    let mut state = GameState::new(EngineConfig::default().with_seed(99));
    state.start();
    state.apply_action(GameAction::MoveDown);
    state.apply_action(GameAction::Rotate);

    assert!(state.apply_action(GameAction::AdvanceLevel));
    assert_eq!(state.level(), 2);
    assert_eq!(state.cursor(), Position::new(0, 0));
    assert_eq!(state.orientation(), Orientation::Horizontal);
    assert_eq!(state.demands().len(), 4);
    assert!(state.grid().is_full());
    assert!(state
        .grid()
        .cells()
        .iter()
        .filter_map(|c| c.ingredient)
        .all(|kind| progression::is_unlocked(kind, 2)));

    state.start_level(15);
    assert_eq!(state.pool().len(), 16);
}

#[test]
fn test_play_many_turns() {
    init_logger();

    let mut state = GameState::new(EngineConfig::default().with_seed(2024));
    state.start();

    let mut hits = 0;
    let mut stars = 0;
    for turn in 0..400u32 {
        let action = match turn % 5 {
            0 => GameAction::MoveRight,
            1 => GameAction::MoveDown,
            2 => GameAction::Rotate,
            3 => GameAction::Select,
            _ => GameAction::ClearSelection,
        };
        // Wrap the cursor back once it reaches the corner
        if state.cursor() == Position::new(3, 3) {
            for _ in 0..3 {
                state.apply_action(GameAction::MoveUp);
                state.apply_action(GameAction::MoveLeft);
            }
        }

        if action == GameAction::Select {
            if let Some(result) = state.select_cursor_line() {
                hits += 1;
                stars += result.total_stars();
                assert_eq!(state.last_stars_earned(), result.total_stars());
            }
            let event = state.take_last_event().expect("every selection is recorded");
            assert_eq!(event.turn_id, state.turn_id());
        } else {
            state.apply_action(action);
        }

        assert!(state.grid().is_full());
        assert!(state.grid().is_settled());
        assert!(state.demands().len() <= 4);
        assert!(!state.demands().is_empty());
        for column in 0..4 {
            assert_eq!(state.grid().queue(column).map(|q| q.len()), Some(4));
        }
    }

    assert_eq!(state.stars(), stars);
    assert!(hits > 0, "no selection ever matched a demand");
}

#[test]
fn test_restart_replays_the_same_session() {
    let mut state = GameState::new(EngineConfig::default().with_seed(5));
    state.start();
    let opening = state.snapshot();

    for _ in 0..5 {
        state.apply_action(GameAction::Select);
        state.apply_action(GameAction::MoveDown);
    }
    state.apply_action(GameAction::Restart);

    let replay = state.snapshot();
    assert_eq!(replay.episode_id, 1);
    assert_eq!(replay.cells, opening.cells);
    assert_eq!(replay.demands, opening.demands);
    assert_eq!(replay.queues, opening.queues);
    assert!(replay.state_version > opening.state_version);
}

#[test]
fn test_config_from_lookup_round_trip() {
    let config = EngineConfig::from_lookup(|key| match key {
        "RAMEN_RUSH_GRID_SIZE" => Some("6".to_string()),
        "RAMEN_RUSH_SEED" => Some("31".to_string()),
        _ => None,
    })
    .expect("valid overrides");

    let mut state = GameState::new(config);
    state.start();
    assert_eq!(state.grid().size(), 6);
    assert_eq!(state.seed(), 31);

    let err = EngineConfig::from_lookup(|key| {
        (key == "RAMEN_RUSH_MIN_RUN").then(|| "zero".to_string())
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { key: "RAMEN_RUSH_MIN_RUN", .. }));
}

#[test]
fn test_action_names_round_trip() {
    for action in [
        GameAction::MoveUp,
        GameAction::MoveDown,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::Select,
        GameAction::ClearSelection,
        GameAction::AdvanceLevel,
        GameAction::Restart,
    ] {
        assert_eq!(GameAction::from_str(action.as_str()), Some(action));
    }
}
