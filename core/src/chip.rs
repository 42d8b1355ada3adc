//! Casino chips. Created by the CreateChip event and never spent.

use crate::types::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub value: Amount,
}

impl Chip {
    pub fn new(value: Amount) -> Self {
        Self { value }
    }
}

impl Add for Chip {
    type Output = Chip;

    fn add(self, other: Chip) -> Chip {
        Chip::new(self.value + other.value)
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chip(value={})", self.value)
    }
}
