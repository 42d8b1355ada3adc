//! Roster tests: ordering, name lookup, copies, bounds.

use goose_casino_core::{error::CasinoError, goose::Goose, player::Player, roster::Roster};

fn players() -> Roster<Player> {
    [
        Player::new("Alexey", 200),
        Player::new("Maria", 0),
        Player::new("Ivan", 100),
        Player::new("Alexey", 5),
    ]
    .into_iter()
    .collect()
}

#[test]
fn find_by_name_returns_first_match() {
    let roster = players();
    assert_eq!(roster.find_by_name("Alexey").unwrap().balance, 200);
    assert_eq!(roster.position_by_name("Ivan"), Some(2));
    assert!(roster.find_by_name("Olga").is_none());
}

#[test]
fn players_with_balance_keeps_order_and_excludes_zero() {
    let roster = players();
    let names: Vec<&str> = roster
        .players_with_balance()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alexey", "Ivan", "Alexey"]);
    assert_eq!(roster.rich_indices(), vec![0, 2, 3]);
}

#[test]
fn slice_is_a_copy() {
    let mut roster = players();
    let head = roster.slice(0..2);
    roster[0].balance = 1;

    assert_eq!(head.len(), 2);
    assert_eq!(head[0].balance, 200, "slice must not alias the source");
    assert_eq!(roster.slice(3..99).len(), 1, "out-of-range end is clipped");
}

#[test]
fn insert_and_remove_respect_bounds() {
    let mut roster = players();
    roster.insert(1, Player::new("Olga", 80)).unwrap();
    assert_eq!(roster[1].name, "Olga");
    roster.insert(roster.len(), Player::new("Tail", 1)).unwrap();
    assert_eq!(roster[roster.len() - 1].name, "Tail");

    let err = roster.insert(99, Player::new("Far", 1)).unwrap_err();
    assert!(matches!(err, CasinoError::IndexOutOfRange { index: 99, .. }));

    let removed = roster.remove(1).unwrap();
    assert_eq!(removed.name, "Olga");
    assert!(matches!(roster.remove(42), Err(CasinoError::IndexOutOfRange { .. })));
}

#[test]
fn replace_swaps_in_place() {
    let mut roster = players();
    let old = roster.replace(2, Player::new("Olga", 80)).unwrap();
    assert_eq!(old.name, "Ivan");
    assert_eq!(roster[2].name, "Olga");
    assert!(roster.replace(10, Player::new("X", 0)).is_err());
}

#[test]
fn war_indices_pick_attack_capable_geese() {
    let geese: Roster<Goose> = [
        Goose::plain("Pyotr", 3),
        Goose::war("Gena", 5, 15),
        Goose::honker("Vasya", 10, 7),
        Goose::war("Max", 7, 12),
    ]
    .into_iter()
    .collect();
    assert_eq!(geese.war_indices(), vec![1, 3]);
    assert_eq!(
        geese.slice(0..2).to_string(),
        "[Goose(name=Pyotr, honk_volume=3), WarGoose(name=Gena, power=15)]"
    );
}
