//! Event kinds and their outcomes.
//!
//! RULE: Every event operation returns exactly one EventOutcome.
//! A short-circuit ("nobody to rob") is a valid outcome, not an error.
//! Display on an outcome is the human-readable result line.

use crate::{
    chip::Chip,
    goose::GooseFlock,
    types::{Amount, EntityName, Step},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven weighted events, in dispatch-table order.
/// NEVER reorder: the weight table and replayed runs depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PlayerBet,
    GooseAttack,
    GooseHonk,
    GooseSteal,
    PlayerPanic,
    CreateChip,
    GooseGang,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        Self::PlayerBet,
        Self::GooseAttack,
        Self::GooseHonk,
        Self::GooseSteal,
        Self::PlayerPanic,
        Self::CreateChip,
        Self::GooseGang,
    ];

    /// Stable name, used as the event_type in the history.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayerBet   => "player_bet",
            Self::GooseAttack => "goose_attack",
            Self::GooseHonk   => "goose_honk",
            Self::GooseSteal  => "goose_steal",
            Self::PlayerPanic => "player_panic",
            Self::CreateChip  => "create_chip",
            Self::GooseGang   => "goose_gang",
        }
    }
}

/// Result of one event operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    // ── PlayerBet ──────────────────────────────────
    NoBettors,
    BetWon {
        player: EntityName,
        bet:    Amount,
        payout: Amount,
    },
    BetLost {
        player: EntityName,
        bet:    Amount,
    },
    BetRefused {
        player:  EntityName,
        bet:     Amount,
        balance: Amount,
    },

    // ── GooseAttack ────────────────────────────────
    NoGeeseOrPlayers,
    NoWarGeese,
    Attacked {
        goose:  EntityName,
        player: EntityName,
        damage: Amount,
        before: Amount,
        after:  Amount,
    },

    // ── GooseHonk ──────────────────────────────────
    Honked {
        goose: EntityName,
        shout: String,
    },
    SuperHonked {
        goose:      EntityName,
        winners:    usize,
        honk_power: Amount,
    },

    // ── GooseSteal ─────────────────────────────────
    StealFailed {
        goose: EntityName,
    },
    Stolen {
        goose:   EntityName,
        player:  EntityName,
        amount:  Amount,
        balance: Amount,
    },

    // ── PlayerPanic ────────────────────────────────
    NoPlayersToPanic,
    NoPanic,
    Panicked {
        player: EntityName,
        lost:   Amount,
    },

    // ── CreateChip ─────────────────────────────────
    ChipCreated {
        chip: Chip,
    },
    ChipCombined {
        chip:        Chip,
        combination: Chip,
    },

    // ── GooseGang ──────────────────────────────────
    TooFewGeese,
    FlockFormed {
        flock: GooseFlock,
    },
}

impl EventOutcome {
    /// True when the event changed nothing because its pool was empty.
    pub fn is_no_op(&self) -> bool {
        matches!(
            self,
            Self::NoBettors
                | Self::NoGeeseOrPlayers
                | Self::NoWarGeese
                | Self::StealFailed { .. }
                | Self::NoPlayersToPanic
                | Self::NoPanic
                | Self::TooFewGeese
        )
    }
}

impl fmt::Display for EventOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBettors => write!(f, "Nobody can place a bet"),
            Self::BetWon { player, bet, payout } => {
                write!(f, "{player} bets {bet} and wins {payout}!")
            }
            Self::BetLost { player, bet } => write!(f, "{player} bets {bet} and loses."),
            Self::BetRefused { player, bet, balance } => {
                write!(f, "{player} cannot bet {bet} (balance = {balance})")
            }
            Self::NoGeeseOrPlayers => {
                write!(f, "No geese or players around. Nothing happens.")
            }
            Self::NoWarGeese => write!(f, "No war geese. The attack fails."),
            Self::Attacked { goose, player, damage, before, after } => write!(
                f,
                "{goose} attacks {player}! Balance reduced by {damage} (was: {before}, now: {after})"
            ),
            Self::Honked { shout, .. } => write!(f, "{shout}"),
            Self::SuperHonked { goose, winners, honk_power } => write!(
                f,
                "{goose} lets out a super honk! {winners} players receive {honk_power} coins each."
            ),
            Self::StealFailed { goose } => {
                write!(f, "{goose} tried to steal, but every player is broke.")
            }
            Self::Stolen { goose, player, amount, balance } => {
                write!(f, "{goose} stole {amount} from {player} (balance {balance}).")
            }
            Self::NoPlayersToPanic => write!(f, "No players to panic."),
            Self::NoPanic => write!(
                f,
                "Every player has already lost everything. No panic today :("
            ),
            Self::Panicked { player, lost } => {
                write!(f, "{player} panics and loses all {lost}!")
            }
            Self::ChipCreated { chip } => write!(f, "Created chip {chip}"),
            Self::ChipCombined { chip, combination } => write!(
                f,
                "Created chip {chip}, combined with an earlier one: {combination}"
            ),
            Self::TooFewGeese => write!(f, "Too few geese to form a flock"),
            Self::FlockFormed { flock } => {
                let names = flock.names();
                write!(f, "{} formed a flock: {flock}!", names.join(" and "))
            }
        }
    }
}

/// One dispatched step as kept in the engine history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub step:       Step,
    pub event_type: String,
    pub payload:    String, // JSON-serialized EventOutcome
}
