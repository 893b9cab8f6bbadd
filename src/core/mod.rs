pub mod error;
pub mod types;

pub use error::{FlatSqlError, Result};
pub use types::{FlatRow, TABLE_NAME};
