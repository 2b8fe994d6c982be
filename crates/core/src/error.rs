//! Error types for GhostStack.

use thiserror::Error;

/// Result type alias for GhostStack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ingesting a manifest or driving a plan.
///
/// Per-box packing failures are not errors: a box with no fitting
/// orientation becomes a rejected plan entry instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A manifest box has a non-positive or non-finite dimension,
    /// or a negative weight / max load.
    #[error("Invalid dimension for box {index}: {message}")]
    InvalidBoxDimension {
        /// Manifest index of the offending box.
        index: usize,
        /// What was wrong with it.
        message: String,
    },

    /// Invalid pallet provided.
    #[error("Invalid pallet: {0}")]
    InvalidPallet(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Plan entry index out of range.
    #[error("No plan entry at index {index} (plan has {len} entries)")]
    InvalidEntry {
        /// Requested index.
        index: usize,
        /// Number of entries in the plan.
        len: usize,
    },

    /// Attempt to modify an entry whose placement is already confirmed or rejected.
    #[error("Plan entry {0} is frozen")]
    EntryFrozen(usize),

    /// Attempt to confirm an entry that has no planned position yet.
    #[error("Plan entry {0} has not been planned")]
    EntryNotPlanned(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidBoxDimension {
            index: 3,
            message: "width must be positive, got -1".into(),
        };
        assert_eq!(
            format!("{err}"),
            "Invalid dimension for box 3: width must be positive, got -1"
        );

        let err = Error::InvalidEntry { index: 7, len: 2 };
        assert!(format!("{err}").contains("index 7"));
        assert_eq!(format!("{}", Error::EntryFrozen(1)), "Plan entry 1 is frozen");
    }
}
