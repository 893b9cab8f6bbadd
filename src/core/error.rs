use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlatSqlError {
    #[error("data cannot be empty")]
    EmptyData,

    #[error("expected an object at {0}")]
    NotAnObject(String),

    #[error("list values are not supported (found at {0})")]
    ListValue(String),

    #[error("data contains no columns to query")]
    NoColumns,

    #[error("paths '{first}' and '{second}' both map to column '{column}'")]
    ColumnCollision {
        first: String,
        second: String,
        column: String,
    },

    #[error("sql query cannot be empty")]
    EmptySql,

    #[error("SQL execution error: {0}")]
    Query(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FlatSqlError>;

impl FlatSqlError {
    /// True for errors the caller can fix by correcting the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
