use crate::{
    error::{CasinoError, CasinoResult},
    goose::{Goose, GooseKind},
    player::Player,
    types::Amount,
};
use serde::{Deserialize, Serialize};

/// Relative weight of each event in the dispatcher. Weights need not
/// sum to 1; the draw is proportional to the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWeights {
    pub player_bet:   f64,
    pub goose_attack: f64,
    pub goose_honk:   f64,
    pub goose_steal:  f64,
    pub player_panic: f64,
    pub create_chip:  f64,
    pub goose_gang:   f64,
}

impl Default for EventWeights {
    fn default() -> Self {
        Self {
            player_bet:   0.20,
            goose_attack: 0.15,
            goose_honk:   0.15,
            goose_steal:  0.15,
            player_panic: 0.10,
            create_chip:  0.15,
            goose_gang:   0.10,
        }
    }
}

impl EventWeights {
    /// Weights in EventKind::ALL order.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.player_bet,
            self.goose_attack,
            self.goose_honk,
            self.goose_steal,
            self.player_panic,
            self.create_chip,
            self.goose_gang,
        ]
    }
}

/// Magnitudes and odds used inside the event bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Upper bound of a single bet (further capped by the balance).
    pub max_bet:           Amount,
    /// A bet wins when the uniform draw is strictly greater than this.
    pub win_threshold:     f64,
    pub payout_multiplier: Amount,
    /// Upper bound of a single theft (further capped by the balance).
    pub max_steal:         Amount,
    pub max_chip_value:    Amount,
    /// Chip combination is reported once more than this many chips exist.
    pub combine_after:     usize,
    /// A player is credited when their draw is strictly greater than this.
    pub super_honk_chance: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_bet:           100,
            win_threshold:     0.67,
            payout_multiplier: 3,
            max_steal:         10,
            max_chip_value:    100,
            combine_after:     2,
            super_honk_chance: 0.5,
        }
    }
}

/// The starting roster registered by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub players: Vec<Player>,
    pub geese:   Vec<Goose>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            players: vec![
                Player::new("Alexey", 200),
                Player::new("Maria", 150),
                Player::new("Ivan", 100),
                Player::new("Olga", 80),
            ],
            geese: vec![
                Goose::war("Gennady the Brawler", 5, 15),
                Goose::honker("Vasily the Screamer", 10, 7),
                Goose::plain("Pyotr the Ordinary", 3),
                Goose::war("Maxim the Striker", 7, 12),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CasinoConfig {
    #[serde(default)]
    pub weights: EventWeights,
    #[serde(default)]
    pub rules:   RuleConfig,
    #[serde(default)]
    pub roster:  RosterConfig,
}

impl CasinoConfig {
    /// Load and validate a JSON config file.
    /// In tests, use CasinoConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Bad config in {path}: {e}"))?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> CasinoResult<Self> {
        let config: CasinoConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CasinoResult<()> {
        let weights = self.weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("event weights must be finite and non-negative"));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(invalid("at least one event weight must be positive"));
        }

        let rules = &self.rules;
        if rules.max_bet < 1 {
            return Err(invalid(format!("max_bet must be >= 1, got {}", rules.max_bet)));
        }
        if rules.max_steal < 1 {
            return Err(invalid(format!("max_steal must be >= 1, got {}", rules.max_steal)));
        }
        if rules.payout_multiplier < 0 {
            return Err(invalid(format!(
                "payout_multiplier must be >= 0, got {}",
                rules.payout_multiplier
            )));
        }
        if rules.max_chip_value < 1 {
            return Err(invalid(format!(
                "max_chip_value must be >= 1, got {}",
                rules.max_chip_value
            )));
        }
        for (label, p) in [
            ("win_threshold", rules.win_threshold),
            ("super_honk_chance", rules.super_honk_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{label} must be within [0, 1], got {p}")));
            }
        }

        for player in &self.roster.players {
            if player.balance < 0 {
                return Err(invalid(format!(
                    "player '{}' starts with negative balance {}",
                    player.name, player.balance
                )));
            }
        }
        for goose in &self.roster.geese {
            match goose.kind {
                GooseKind::War { power } if power < 1 => {
                    return Err(invalid(format!(
                        "war goose '{}' needs power >= 1, got {power}",
                        goose.name
                    )));
                }
                GooseKind::Honk { honk_power } if honk_power < 0 => {
                    return Err(invalid(format!(
                        "honk goose '{}' needs honk_power >= 0, got {honk_power}",
                        goose.name
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> CasinoError {
    CasinoError::InvalidConfig(msg.into())
}
