//! Ordered entity collections.
//!
//! A Roster is an owned, ordered Vec with name lookup. Duplicate names
//! are allowed; lookups return the first match. Event code addresses
//! members by index so every mutation goes through the engine.

use crate::{
    error::{CasinoError, CasinoResult},
    goose::Goose,
    player::Player,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut, Range};

/// Anything with a ledger key.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Player {
    fn name(&self) -> &str { &self.name }
}

impl Named for Goose {
    fn name(&self) -> &str { &self.name }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster<T> {
    members: Vec<T>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self { members: Vec::new() }
    }
}

impl<T> Roster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn push(&mut self, member: T) {
        self.members.push(member);
    }

    /// Replace the member at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, member: T) -> CasinoResult<T> {
        let len = self.members.len();
        let slot = self
            .members
            .get_mut(index)
            .ok_or(CasinoError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, member))
    }

    /// Insert before `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, member: T) -> CasinoResult<()> {
        let len = self.members.len();
        if index > len {
            return Err(CasinoError::IndexOutOfRange { index, len });
        }
        self.members.insert(index, member);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> CasinoResult<T> {
        let len = self.members.len();
        if index >= len {
            return Err(CasinoError::IndexOutOfRange { index, len });
        }
        Ok(self.members.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.members.iter_mut()
    }
}

impl<T: Clone> Roster<T> {
    /// Copy a range into a new roster. Out-of-range bounds are clipped.
    pub fn slice(&self, range: Range<usize>) -> Roster<T> {
        let end = range.end.min(self.members.len());
        let start = range.start.min(end);
        Roster { members: self.members[start..end].to_vec() }
    }
}

impl<T: Named> Roster<T> {
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.members.iter().find(|m| m.name() == name)
    }

    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name() == name)
    }
}

impl Roster<Player> {
    /// Indices of players with a strictly positive balance, in roster order.
    pub fn rich_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_rich())
            .map(|(i, _)| i)
            .collect()
    }

    /// Snapshot of the rich players at call time.
    pub fn players_with_balance(&self) -> Vec<&Player> {
        self.members.iter().filter(|p| p.is_rich()).collect()
    }
}

impl Roster<Goose> {
    pub fn war_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, g)| g.can_attack())
            .map(|(i, _)| i)
            .collect()
    }
}

/// Panics on an out-of-range index, like Vec. Event code only indexes
/// with positions taken from this roster.
impl<T> Index<usize> for Roster<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.members[index]
    }
}

impl<T> IndexMut<usize> for Roster<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.members[index]
    }
}

impl<T> FromIterator<T> for Roster<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { members: iter.into_iter().collect() }
    }
}

impl<'a, T> IntoIterator for &'a Roster<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Roster<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{member}")?;
        }
        write!(f, "]")
    }
}
