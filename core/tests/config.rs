//! Config tests: defaults, the shipped JSON file, validation.

use goose_casino_core::{
    config::CasinoConfig,
    error::CasinoError,
    goose::{Goose, GooseKind},
    player::Player,
};

fn shipped_config_path() -> String {
    format!("{}/../data/casino.json", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn default_roster_matches_the_fixed_lineup() {
    let config = CasinoConfig::default();
    let players: Vec<(&str, i64)> = config
        .roster
        .players
        .iter()
        .map(|p| (p.name.as_str(), p.balance))
        .collect();
    assert_eq!(players, vec![("Alexey", 200), ("Maria", 150), ("Ivan", 100), ("Olga", 80)]);

    let kinds: Vec<GooseKind> = config.roster.geese.iter().map(|g| g.kind).collect();
    assert_eq!(
        kinds,
        vec![
            GooseKind::War { power: 15 },
            GooseKind::Honk { honk_power: 7 },
            GooseKind::Plain,
            GooseKind::War { power: 12 },
        ]
    );
    config.validate().expect("defaults are valid");
}

#[test]
fn shipped_file_equals_defaults() {
    let config = CasinoConfig::load(&shipped_config_path()).expect("load data/casino.json");
    let defaults = CasinoConfig::default();

    assert_eq!(config.roster, defaults.roster);
    assert_eq!(config.rules.max_bet, defaults.rules.max_bet);
    assert_eq!(config.rules.payout_multiplier, defaults.rules.payout_multiplier);
    assert_eq!(config.rules.max_steal, defaults.rules.max_steal);
    assert_eq!(config.rules.max_chip_value, defaults.rules.max_chip_value);
    assert_eq!(config.rules.combine_after, defaults.rules.combine_after);

    let close = |a: f64, b: f64| (a - b).abs() < 1e-12;
    assert!(close(config.rules.win_threshold, defaults.rules.win_threshold));
    assert!(close(config.rules.super_honk_chance, defaults.rules.super_honk_chance));
    for (loaded, default) in config.weights.as_array().iter().zip(defaults.weights.as_array()) {
        assert!(close(*loaded, default), "weight {loaded} != {default}");
    }
}

#[test]
fn empty_object_falls_back_to_defaults() {
    let config = CasinoConfig::from_json("{}").unwrap();
    assert_eq!(config, CasinoConfig::default());
}

#[test]
fn missing_file_names_the_path() {
    let err = CasinoConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = CasinoConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, CasinoError::Serialization(_)));
    assert!(!err.is_validation());
}

#[test]
fn validation_rejects_bad_values() {
    let mut zero_weights = CasinoConfig::default();
    let w = &mut zero_weights.weights;
    w.player_bet = 0.0;
    w.goose_attack = 0.0;
    w.goose_honk = 0.0;
    w.goose_steal = 0.0;
    w.player_panic = 0.0;
    w.create_chip = 0.0;
    w.goose_gang = 0.0;

    let mut no_bets = CasinoConfig::default();
    no_bets.rules.max_bet = 0;

    let mut odd_chance = CasinoConfig::default();
    odd_chance.rules.super_honk_chance = 1.5;

    let mut broke_from_birth = CasinoConfig::default();
    broke_from_birth.roster.players.push(Player::new("Debtor", -5));

    let mut toothless = CasinoConfig::default();
    toothless.roster.geese.push(Goose::war("Toothless", 1, 0));

    let mut clawback = CasinoConfig::default();
    clawback.rules.payout_multiplier = -3;

    let mut drain_honk = CasinoConfig::default();
    drain_honk.roster.geese.push(Goose::honker("Drainer", 10, -50));

    for (label, config) in [
        ("zero weights", zero_weights),
        ("max_bet 0", no_bets),
        ("chance 1.5", odd_chance),
        ("negative balance", broke_from_birth),
        ("power 0", toothless),
        ("negative payout", clawback),
        ("negative honk_power", drain_honk),
    ] {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, CasinoError::InvalidConfig(_)),
            "{label}: expected InvalidConfig, got {err}"
        );
    }
}

#[test]
fn zero_payout_and_silent_honk_are_allowed() {
    let mut config = CasinoConfig::default();
    config.rules.payout_multiplier = 0;
    config.roster.geese.push(Goose::honker("Mute", 1, 0));
    config.validate().expect("zero is a legal payout and honk power");
}
