//! Audited name -> amount maps.
//!
//! RULE: Every write to a tracked balance goes through `Ledger::set`.
//! Each write appends an immutable LedgerEntry to the change log and
//! emits it synchronously to the ledger's sink. Writes never fail.
//! The log only grows for the lifetime of the ledger.

use crate::{
    error::{CasinoError, CasinoResult},
    types::{Amount, EntityName},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc;

/// One balance transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub key:       EntityName,
    pub old_value: Amount,
    pub new_value: Amount,
    pub delta:     Amount,
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.delta >= 0 { "+" } else { "" };
        write!(
            f,
            "{}: {} -> {} (change: {sign}{})",
            self.key, self.old_value, self.new_value, self.delta
        )
    }
}

/// Operator-visible channel that receives every ledger write.
pub trait LedgerSink: Send {
    fn record(&mut self, ledger: &str, entry: &LedgerEntry);
}

/// Default sink: the `log` facade under the "ledger" target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LedgerSink for LogSink {
    fn record(&mut self, ledger: &str, entry: &LedgerEntry) {
        log::info!(target: "ledger", "[{ledger}] {entry}");
    }
}

/// Forwards every entry down an mpsc channel.
pub struct ChannelSink {
    tx: mpsc::Sender<LedgerEntry>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::Receiver<LedgerEntry>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl LedgerSink for ChannelSink {
    fn record(&mut self, _ledger: &str, entry: &LedgerEntry) {
        // A dropped receiver only means nobody is listening any more.
        let _ = self.tx.send(entry.clone());
    }
}

pub struct Ledger {
    label:    String,
    balances: HashMap<EntityName, Amount>,
    /// Keys in first-write order.
    order:    Vec<EntityName>,
    log:      Vec<LedgerEntry>,
    sink:     Box<dyn LedgerSink>,
}

impl Ledger {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_sink(label, Box::new(LogSink))
    }

    pub fn with_sink(label: impl Into<String>, sink: Box<dyn LedgerSink>) -> Self {
        Self {
            label:    label.into(),
            balances: HashMap::new(),
            order:    Vec::new(),
            log:      Vec::new(),
            sink,
        }
    }

    pub fn set_sink(&mut self, sink: Box<dyn LedgerSink>) {
        self.sink = sink;
    }

    /// Write `value` under `key`. An unseen key starts from 0.
    pub fn set(&mut self, key: &str, value: Amount) -> &LedgerEntry {
        let old_value = self.get_or(key, 0);
        if !self.balances.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.balances.insert(key.to_string(), value);

        let entry = LedgerEntry {
            key: key.to_string(),
            old_value,
            new_value: value,
            delta: value - old_value,
        };
        self.sink.record(&self.label, &entry);
        self.log.push(entry);
        &self.log[self.log.len() - 1]
    }

    pub fn get(&self, key: &str) -> CasinoResult<Amount> {
        self.balances
            .get(key)
            .copied()
            .ok_or_else(|| CasinoError::KeyNotFound { key: key.to_string() })
    }

    pub fn get_or(&self, key: &str, default: Amount) -> Amount {
        self.balances.get(key).copied().unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.balances.contains_key(key)
    }

    /// Drop a key. Not a balance write, so nothing is logged.
    pub fn delete(&mut self, key: &str) -> CasinoResult<Amount> {
        let value = self
            .balances
            .remove(key)
            .ok_or_else(|| CasinoError::KeyNotFound { key: key.to_string() })?;
        self.order.retain(|k| k != key);
        Ok(value)
    }

    /// (key, value) pairs in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> + '_ {
        self.order
            .iter()
            .filter_map(|k| self.balances.get(k).map(|v| (k.as_str(), *v)))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn log(&self) -> &[LedgerEntry] {
        &self.log
    }

    pub fn last_entry(&self) -> Option<&LedgerEntry> {
        self.log.last()
    }

    /// Highest value; the earliest key wins ties.
    pub fn top_entry(&self) -> Option<(&str, Amount)> {
        self.iter()
            .reduce(|best, next| if next.1 > best.1 { next } else { best })
    }

    /// Owned copy of the current values, in first-write order.
    pub fn to_pairs(&self) -> Vec<(EntityName, Amount)> {
        self.iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("label", &self.label)
            .field("balances", &self.to_pairs())
            .field("log_len", &self.log.len())
            .finish()
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({{", self.label)?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key:?}: {value}")?;
        }
        write!(f, "}})")
    }
}
