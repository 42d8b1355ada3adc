//! Shared primitive types used across the entire casino.

/// One dispatcher invocation. Steps are 1-indexed in reports.
pub type Step = u64;

/// Name of a player or goose. Doubles as the ledger key.
pub type EntityName = String;

/// Balances, incomes, chip values and bet sizes.
pub type Amount = i64;
