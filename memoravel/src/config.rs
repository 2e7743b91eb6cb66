//! History configuration.

use thiserror::Error;

/// Budgets and protection rules for a [`History`](crate::History).
///
/// A limit of `0` means unbounded. Validated once, at construction - a
/// `History` is never built from a contradictory configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of entries, `0` = unbounded.
    pub count_limit: usize,
    /// Maximum total token cost, `0` = unbounded.
    pub token_limit: u32,
    /// Number of leading entries exempt from eviction.
    pub preserve_initial: usize,
    /// Number of trailing entries exempt from eviction.
    pub preserve_last: usize,
    /// When true, system-role entries are never evicted regardless of position.
    pub preserve_system: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            count_limit: 10,
            token_limit: 8000,
            preserve_initial: 0,
            preserve_last: 1,
            preserve_system: true,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("preserve_initial ({preserve_initial}) cannot exceed count_limit ({count_limit})")]
    InitialExceedsCountLimit {
        preserve_initial: usize,
        count_limit: usize,
    },
    #[error("preserve_last ({preserve_last}) cannot exceed count_limit ({count_limit})")]
    LastExceedsCountLimit {
        preserve_last: usize,
        count_limit: usize,
    },
}

impl HistoryConfig {
    /// No budgets, no protections. Useful as a starting point for overrides.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            count_limit: 0,
            token_limit: 0,
            preserve_initial: 0,
            preserve_last: 0,
            preserve_system: false,
        }
    }

    /// Protecting more entries than the store may ever hold is a contradiction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count_limit > 0 {
            if self.preserve_initial > self.count_limit {
                return Err(ConfigError::InitialExceedsCountLimit {
                    preserve_initial: self.preserve_initial,
                    count_limit: self.count_limit,
                });
            }
            if self.preserve_last > self.count_limit {
                return Err(ConfigError::LastExceedsCountLimit {
                    preserve_last: self.preserve_last,
                    count_limit: self.count_limit,
                });
            }
        }
        Ok(())
    }
}
