//! Casino players: a name and a chip balance.

use crate::types::{Amount, EntityName};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name:    EntityName,
    pub balance: Amount,
}

impl Player {
    pub fn new(name: impl Into<EntityName>, balance: Amount) -> Self {
        Self { name: name.into(), balance }
    }

    /// Place a bet. Refuses (returns false, no mutation) when the
    /// amount exceeds the current balance.
    pub fn bet(&mut self, amount: Amount) -> bool {
        if amount > self.balance {
            return false;
        }
        self.balance -= amount;
        true
    }

    /// Credit winnings. No upper bound.
    pub fn win(&mut self, amount: Amount) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Debit `amount`, never going below zero. Returns the amount
    /// actually removed.
    pub fn take_damage(&mut self, amount: Amount) -> Amount {
        let before = self.balance;
        self.balance = (self.balance - amount).max(0);
        before - self.balance
    }

    /// A rich player has a strictly positive balance.
    pub fn is_rich(&self) -> bool {
        self.balance > 0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player(name={}, balance={})", self.name, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bet_within_balance_debits() {
        let mut p = Player::new("Ivan", 100);
        assert!(p.bet(40));
        assert_eq!(p.balance, 60);
        assert!(p.bet(60), "betting the whole balance is allowed");
        assert_eq!(p.balance, 0);
    }

    #[test]
    fn bet_above_balance_is_refused() {
        let mut p = Player::new("Ivan", 100);
        assert!(!p.bet(101));
        assert_eq!(p.balance, 100, "refused bet must not mutate the balance");
    }

    #[test]
    fn win_credits_unconditionally() {
        let mut p = Player::new("Maria", 0);
        p.win(150);
        assert_eq!(p.balance, 150);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut p = Player::new("Olga", 3);
        assert_eq!(p.take_damage(10), 3);
        assert_eq!(p.balance, 0);
        assert!(!p.is_rich());
    }

    #[test]
    fn display_format() {
        let p = Player::new("Alexey", 200);
        assert_eq!(p.to_string(), "Player(name=Alexey, balance=200)");
    }
}
