//! Geese: one struct, a closed set of variants.
//!
//! Which events a goose can take part in is decided by its GooseKind
//! through `capabilities()`, resolved once per dispatch.

use crate::types::{Amount, EntityName};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GooseKind {
    Plain,
    /// Attacks a player for 1..=power damage.
    War { power: Amount },
    /// Super-honks: each player independently may receive honk_power.
    Honk { honk_power: Amount },
}

/// What a goose may do beyond honking and flocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub attack:     Option<Amount>,
    pub super_honk: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goose {
    pub name:        EntityName,
    /// 1..=10 by convention; not enforced.
    pub honk_volume: i64,
    pub kind:        GooseKind,
}

impl Goose {
    pub fn plain(name: impl Into<EntityName>, honk_volume: i64) -> Self {
        Self { name: name.into(), honk_volume, kind: GooseKind::Plain }
    }

    pub fn war(name: impl Into<EntityName>, honk_volume: i64, power: Amount) -> Self {
        Self { name: name.into(), honk_volume, kind: GooseKind::War { power } }
    }

    pub fn honker(name: impl Into<EntityName>, honk_volume: i64, honk_power: Amount) -> Self {
        Self { name: name.into(), honk_volume, kind: GooseKind::Honk { honk_power } }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self.kind {
            GooseKind::Plain => Capabilities::default(),
            GooseKind::War { power } => Capabilities { attack: Some(power), super_honk: None },
            GooseKind::Honk { honk_power } => Capabilities { attack: None, super_honk: Some(honk_power) },
        }
    }

    pub fn can_attack(&self) -> bool {
        self.capabilities().attack.is_some()
    }

    /// The plain honk every goose can do.
    pub fn honk(&self) -> String {
        format!("{} honks at volume {}!", self.name, self.honk_volume)
    }

    /// A honk goose answers when called by name; other geese ignore it.
    pub fn call(&self) -> Option<String> {
        match self.kind {
            GooseKind::Honk { .. } => Some(format!(
                "Goose {} answers HONK-HONK-HONK at volume {}!",
                self.name, self.honk_volume
            )),
            _ => None,
        }
    }

    /// Combine with another goose into a transient flock.
    pub fn join(&self, other: &Goose) -> GooseFlock {
        GooseFlock { members: vec![self.clone(), other.clone()] }
    }
}

impl fmt::Display for Goose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            GooseKind::Plain => {
                write!(f, "Goose(name={}, honk_volume={})", self.name, self.honk_volume)
            }
            GooseKind::War { power } => {
                write!(f, "WarGoose(name={}, power={})", self.name, power)
            }
            GooseKind::Honk { honk_power } => {
                write!(f, "HonkGoose(name={}, honk_power={})", self.name, honk_power)
            }
        }
    }
}

/// Ephemeral group of geese. Never stored by the casino.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GooseFlock {
    pub members: Vec<Goose>,
}

impl GooseFlock {
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|g| g.name.as_str()).collect()
    }
}

impl fmt::Display for GooseFlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GooseFlock({})", self.names().join(", "))
    }
}
