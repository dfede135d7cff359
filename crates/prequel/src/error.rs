//! Error types for prequel

use thiserror::Error;

/// Result type alias for query building and execution.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error type covering statement compilation and execution.
///
/// Structural violations (a missing target table, an empty SET clause, an
/// empty IN list) are detected during compilation and surfaced immediately;
/// no partial SQL is ever produced. Database errors pass through from the
/// driver untouched.
#[derive(Debug, Error)]
pub enum QueryError {
    /// SELECT compiled without any FROM source
    #[error("SELECT requires at least one FROM source")]
    MissingSource,

    /// Mutation compiled without a target table
    #[error("{0} requires a target table")]
    MissingTarget(&'static str),

    /// UPDATE compiled without any SET assignment
    #[error("UPDATE requires at least one SET assignment")]
    EmptySetClause,

    /// INSERT compiled without any value
    #[error("INSERT requires at least one value")]
    EmptyValues,

    /// INSERT column list and value list disagree in length
    #[error("INSERT column/value count mismatch: {columns} columns, {values} values")]
    ColumnValueMismatch { columns: usize, values: usize },

    /// IN predicate compiled with an empty value list
    #[error("IN predicate requires at least one value")]
    EmptyInList,

    /// Non-cross join compiled without an ON condition
    #[error("{0} requires an ON condition")]
    MissingJoinCondition(&'static str),

    /// CROSS JOIN compiled with an ON condition
    #[error("CROSS JOIN cannot carry an ON condition")]
    CrossJoinWithCondition,

    /// Driver-level error
    #[error("query error: {0}")]
    Db(#[from] tokio_postgres::Error),

    /// Row expected but none returned
    #[error("not found: {0}")]
    NotFound(String),

    /// Exactly one row expected, more returned
    #[error("expected exactly one row, got {0}")]
    TooManyRows(usize),

    /// Row decode/mapping error
    #[error("decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl QueryError {
    /// Create a decode error for a specific column.
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error was raised by a structural precondition rather
    /// than by the database.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            Self::Db(_) | Self::NotFound(_) | Self::TooManyRows(_) | Self::Decode { .. }
        )
    }
}
