//! The history store and its eviction policy.
//!
//! Eviction runs after every mutation: while either budget is violated, the
//! earliest entry inside the removable window `[preserve_initial, len -
//! preserve_last)` that is not role-protected is removed, and the total cost
//! is recomputed. Recomputing after each single removal keeps the stopping
//! condition exact; histories are tens of entries, not a hot path. When only
//! protected entries remain the loop stops with budgets still violated -
//! the degraded state [`BudgetStatus::Degraded`] reports.

use std::path::Path;

use memoravel_types::Entry;

use crate::config::{ConfigError, HistoryConfig};
use crate::persist::{self, PersistError};
use crate::recall::{Recall, RecallError};
use crate::token_counter::{TiktokenCounter, TokenCountError, TokenCounter};

/// Whether the store currently satisfies its configured budgets.
///
/// `Degraded` is a steady state, not an error: protection rules made further
/// trimming impossible, so the store holds more than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Within,
    Degraded {
        /// Entries beyond `count_limit` (0 when only tokens are over).
        entries_over: usize,
        /// Tokens beyond `token_limit` (0 when only the count is over).
        tokens_over: u32,
    },
}

/// One conversation's bounded, ordered entry log.
///
/// Owned by a single caller; no internal synchronization. All operations are
/// synchronous and run to completion.
#[derive(Debug)]
pub struct History {
    config: HistoryConfig,
    entries: Vec<Entry>,
    counter: Box<dyn TokenCounter>,
}

impl History {
    /// Builds a history with the default tiktoken-backed counter.
    pub fn new(config: HistoryConfig) -> Result<Self, ConfigError> {
        Self::with_counter(config, Box::new(TiktokenCounter))
    }

    /// Builds a history with a caller-provided token counter.
    pub fn with_counter(
        config: HistoryConfig,
        counter: Box<dyn TokenCounter>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            entries: Vec::new(),
            counter,
        })
    }

    /// Appends an entry and evicts until both budgets hold (or no removal
    /// candidate remains). Never fails: tokenizer faults degrade to a
    /// zero-cost reading rather than aborting the conversation loop.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.trim();
    }

    /// Atomically swaps the whole sequence, then re-establishes the budgets.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.trim();
    }

    /// Read-only retrieval. At most one selector; see [`Recall`].
    pub fn recall(&self, selector: Recall) -> Result<Vec<&Entry>, RecallError> {
        selector.validate()?;
        let len = self.entries.len();

        let picked = if let Some(n) = selector.last_n {
            self.entries[len.saturating_sub(n)..].iter().collect()
        } else if let Some(n) = selector.first_n {
            self.entries[..n.min(len)].iter().collect()
        } else if let Some(range) = selector.range {
            let start = range.start.unwrap_or(0).min(len);
            let stop = range.stop.unwrap_or(len).min(len);
            let step = range.step.unwrap_or(1);
            if start >= stop {
                Vec::new()
            } else {
                self.entries[start..stop].iter().step_by(step).collect()
            }
        } else {
            self.entries.iter().collect()
        };

        Ok(picked)
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Total token cost over every entry's full serialized form, recomputed
    /// on demand. Reads as zero (and logs) when the counter faults.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        match self.try_total_tokens() {
            Ok(total) => total,
            Err(err) => {
                tracing::warn!("token counting failed, reading history cost as zero: {err}");
                0
            }
        }
    }

    /// How the store currently sits against its budgets.
    #[must_use]
    pub fn budget_status(&self) -> BudgetStatus {
        let entries_over = if self.config.count_limit > 0 {
            self.entries.len().saturating_sub(self.config.count_limit)
        } else {
            0
        };
        let tokens_over = if self.config.token_limit > 0 {
            self.total_tokens().saturating_sub(self.config.token_limit)
        } else {
            0
        };

        if entries_over == 0 && tokens_over == 0 {
            BudgetStatus::Within
        } else {
            BudgetStatus::Degraded {
                entries_over,
                tokens_over,
            }
        }
    }

    /// Writes the entry sequence to `path` (atomic temp file + rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        persist::save_entries(path.as_ref(), &self.entries)
    }

    /// Replaces the history with the sequence parsed from `path`.
    ///
    /// All-or-nothing: the file is fully read and parsed before any state
    /// changes, so a failed load leaves the prior history untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let entries = persist::load_entries(path.as_ref())?;
        self.replace(entries);
        Ok(())
    }

    /// The cost of an entry covers its full serialized form - role, content,
    /// and extensions - so structural overhead counts toward the budget.
    fn try_total_tokens(&self) -> Result<u32, TokenCountError> {
        let mut total: u32 = 0;
        for entry in &self.entries {
            let serialized = serde_json::to_string(entry)?;
            total = total.saturating_add(self.counter.count(&serialized)?);
        }
        Ok(total)
    }

    fn over_budget(&self, total_tokens: u32) -> bool {
        (self.config.token_limit > 0 && total_tokens > self.config.token_limit)
            || (self.config.count_limit > 0 && self.entries.len() > self.config.count_limit)
    }

    /// Ascending index of the first removal candidate, if any.
    fn next_candidate(&self) -> Option<usize> {
        let start = self.config.preserve_initial;
        let stop = self.entries.len().saturating_sub(self.config.preserve_last);
        (start..stop)
            .find(|&index| !(self.config.preserve_system && self.entries[index].role().is_system()))
    }

    fn trim(&mut self) {
        let mut total = self.total_tokens();
        while self.over_budget(total) {
            let Some(index) = self.next_candidate() else {
                tracing::warn!(
                    len = self.entries.len(),
                    total_tokens = total,
                    "budgets exceeded but no removable entry remains; keeping oversized history"
                );
                return;
            };
            let removed = self.entries.remove(index);
            tracing::debug!(index, role = %removed.role(), "evicted entry to satisfy budgets");
            total = self.total_tokens();
        }
    }
}
