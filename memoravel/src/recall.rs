//! Retrieval selectors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecallError {
    #[error("only one of last_n, first_n, or range may be set")]
    ConflictingSelectors,
    #[error("range step must be non-zero")]
    ZeroStep,
}

/// An explicit start/stop/step range over history indices.
///
/// Missing bounds default to the start and end of the history; a missing step
/// defaults to `1`. `start >= stop` is a legal empty selection; a step of `0`
/// is malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceRange {
    pub start: Option<usize>,
    pub stop: Option<usize>,
    pub step: Option<usize>,
}

/// Which part of the history to retrieve.
///
/// At most one selector may be set; the default (no selector) retrieves the
/// entire history. Requesting more than the history holds clamps to the whole
/// history rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recall {
    pub last_n: Option<usize>,
    pub first_n: Option<usize>,
    pub range: Option<SliceRange>,
}

impl Recall {
    /// The entire history, in order.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last(n: usize) -> Self {
        Self {
            last_n: Some(n),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn first(n: usize) -> Self {
        Self {
            first_n: Some(n),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn range(range: SliceRange) -> Self {
        Self {
            range: Some(range),
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), RecallError> {
        let set = usize::from(self.last_n.is_some())
            + usize::from(self.first_n.is_some())
            + usize::from(self.range.is_some());
        if set > 1 {
            return Err(RecallError::ConflictingSelectors);
        }
        if let Some(range) = self.range
            && range.step == Some(0)
        {
            return Err(RecallError::ZeroStep);
        }
        Ok(())
    }
}
