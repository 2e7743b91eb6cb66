//! Bounded, ordered conversation history under count and token budgets.
//!
//! A [`History`] holds one conversation's entries in insertion order and
//! enforces two budgets on every append: a maximum entry count and a maximum
//! token cost. Eviction always removes the earliest unprotected entry, so the
//! most recent turns survive the longest. Protection rules exempt an initial
//! prefix, a trailing suffix, and (optionally) every system-role entry; when
//! only protected entries remain the store stays over budget rather than
//! violating a protection rule - a reportable degraded state, not an error.
//!
//! # Architecture
//!
//! ```text
//! History
//! ├── entries: Vec<Entry>      (insertion order = conversational order)
//! ├── config: HistoryConfig    (budgets + protection rules, validated once)
//! └── counter: dyn TokenCounter (tiktoken by default, injectable)
//! ```
//!
//! # Example
//!
//! ```
//! use memoravel::{Entry, History, HistoryConfig, Recall};
//!
//! let config = HistoryConfig {
//!     count_limit: 5,
//!     token_limit: 8000,
//!     ..HistoryConfig::default()
//! };
//! let mut history = History::new(config)?;
//!
//! history.append(Entry::text("system", "You are Gollum."));
//! history.append(Entry::text("user", "Did you see Frodo?"));
//!
//! let everything = history.recall(Recall::all())?;
//! assert_eq!(everything.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod atomic_write;
mod config;
mod history;
mod persist;
mod recall;
mod token_counter;

pub use config::{ConfigError, HistoryConfig};
pub use history::{BudgetStatus, History};
pub use persist::PersistError;
pub use recall::{Recall, RecallError, SliceRange};
pub use token_counter::{TiktokenCounter, TokenCountError, TokenCounter};

pub use memoravel_types::{Content, Entry, Role};
