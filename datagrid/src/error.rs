//! Table construction errors.

use thiserror::Error;

/// Errors that can occur when building a table.
///
/// Interactions on a built table never fail; only construction validates
/// the caller's contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Both a controlled value and an uncontrolled default were supplied.
    #[error("'{field}' was given both a controlled value and an uncontrolled default")]
    ConflictingState {
        /// The concern, e.g. "selected_row_ids".
        field: &'static str,
    },

    /// A controlled value was supplied without a change handler.
    #[error("controlled '{field}' requires a change handler")]
    MissingChangeHandler {
        /// The concern, e.g. "sorted_column".
        field: &'static str,
    },

    /// Two columns share the same field.
    #[error("duplicate column field '{0}'")]
    DuplicateColumn(String),

    /// Two rows share the same id.
    #[error("duplicate row id '{0}'")]
    DuplicateRow(String),

    /// Cross-page selection only makes sense with multi-select.
    #[error("cross-page selection requires MULTI selection mode")]
    CrossPageRequiresMulti,
}
