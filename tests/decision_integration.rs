//! Decision engine integration tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use siege_ai::ai::affordable_scores;
use siege_ai::batch::{run_batch, BatchConfig};
use siege_ai::core::types::{Building, BuildingKind};
use siege_ai::{Action, DecisionEngine, DecisionRule, EngineError, GameState, WaitReason};

#[test]
fn test_losing_ai_buys_defense_for_every_seed() {
    let engine = DecisionEngine::default();
    let payload = json!({"hp_enemy": 100, "hp_you": 130, "money": 1500});

    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let decision = engine.decide_value(&payload, &mut rng).unwrap();
        assert_eq!(
            decision.action,
            Action::Build {
                kind: BuildingKind::Defense,
                price: 1500.0
            }
        );
    }
}

#[test]
fn test_fresh_match_always_builds_from_full_catalog() {
    let engine = DecisionEngine::default();
    let state = GameState::from_value(&json!({
        "money": 3000,
        "hp_you": 100,
        "hp_enemy": 100,
        "buildings_enemy": [],
        "buildings_you": [],
        "recent_player_actions": []
    }))
    .unwrap();

    let affordable = affordable_scores(&state, 0.5, engine.config());
    assert_eq!(affordable.len(), 5);

    for seed in 0..200 {
        let decision = engine.decide(&state, &mut ChaCha8Rng::seed_from_u64(seed));
        assert_eq!(decision.aggression, 0.5);
        assert_eq!(decision.rule, DecisionRule::Economy);
        assert!(matches!(decision.action, Action::Build { .. }));
    }
}

#[test]
fn test_poor_ai_waits_for_money() {
    let engine = DecisionEngine::default();
    let state = GameState {
        money: 1000.0,
        ..GameState::default()
    };
    let decision = engine.decide(&state, &mut ChaCha8Rng::seed_from_u64(1));
    assert_eq!(decision.action, Action::wait(WaitReason::NotEnoughMoney));
}

#[test]
fn test_no_enemy_launcher_means_no_attack() {
    let engine = DecisionEngine::default();
    let state = GameState {
        money: 500.0,
        buildings_you: vec![Building::new(1, "petro", 1.0)],
        buildings_enemy: vec![
            Building::new(2, "radar", 100.0),
            Building::new(3, "silo", 100.0),
        ],
        recent_player_actions: vec!["attack".into(); 10],
        ..GameState::default()
    };
    let report = run_batch(&engine, &state, &BatchConfig { trials: 2000, seed: 4 });
    assert_eq!(report.action_share("attack"), 0.0);
    assert_eq!(report.action_share("wait"), 1.0);
}

#[test]
fn test_build_distribution_converges_to_utility_weights() {
    let engine = DecisionEngine::default();
    // Rich enough that petro has no scarcity bonus
    let state = GameState {
        money: 100_000.0,
        ..GameState::default()
    };

    let scores = affordable_scores(&state, 0.5, engine.config());
    let total: f64 = scores.iter().map(|(_, s)| s).sum();

    let report = run_batch(
        &engine,
        &state,
        &BatchConfig {
            trials: 40_000,
            seed: 2024,
        },
    );
    assert_eq!(report.action_share("build"), 1.0);

    for (kind, score) in &scores {
        let expected = score / total;
        let observed = report.build_share(kind);
        assert!(
            (observed - expected).abs() < 0.01,
            "{}: observed {:.4}, expected {:.4}",
            kind,
            observed,
            expected
        );
    }
}

#[test]
fn test_sample_snapshot_decides() {
    let engine = DecisionEngine::default();
    let raw = std::fs::read_to_string("data/states/skirmish.json").unwrap();
    let state = GameState::from_json_str(&raw).unwrap();

    for seed in 0..100 {
        let decision = engine.decide(&state, &mut ChaCha8Rng::seed_from_u64(seed));
        // two offensive tags, no defensive ones
        assert!((decision.aggression - 0.7).abs() < 1e-9);
        match decision.action {
            Action::Attack { from, target, .. } => {
                assert_eq!(from.to_string(), "102");
                assert_eq!(target.to_string(), "1");
            }
            Action::Build { price, .. } => assert!(price <= state.money),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn test_wrong_types_are_invalid_state() {
    let engine = DecisionEngine::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    for payload in [
        json!({"money": "3000"}),
        json!({"buildings_enemy": 5}),
        json!({"recent_player_actions": "attack"}),
        json!({"buildings_you": [{"type": "petro"}]}),
    ] {
        let err = engine.decide_value(&payload, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)), "{:?}", err);
    }
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = DecisionEngine::default();
    let state = GameState {
        money: 5000.0,
        buildings_you: vec![Building::new(1, "airport", 50.0)],
        buildings_enemy: vec![Building::new(2, "launcher", 50.0)],
        ..GameState::default()
    };

    let serial: Vec<_> = (0..8)
        .map(|seed| engine.decide(&state, &mut ChaCha8Rng::seed_from_u64(seed)))
        .collect();

    let threaded: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|seed| {
                let engine = &engine;
                let state = &state;
                s.spawn(move || engine.decide(state, &mut ChaCha8Rng::seed_from_u64(seed)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(serial, threaded);
}
