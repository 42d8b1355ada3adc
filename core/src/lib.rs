//! Goose casino: a seeded, turn-based simulation of players and geese
//! sharing one set of audited balances.

pub mod chip;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod goose;
pub mod ledger;
pub mod player;
pub mod rng;
pub mod roster;
pub mod simulation;
pub mod types;
