//! Flattening Engine
//!
//! The bidirectional transform between nested JSON records and the flat
//! tabular shape SQL needs. Both directions are stateless, single-pass walks
//! over a mapping built earlier in the same request.
//!
//! # Architecture
//!
//! - `validator.rs` - rejects list values and non-object items up front
//! - `flattener.rs` - nested records to rows keyed by dotted paths
//! - `mapping.rs` - dotted path to SQL-safe column identifier and back
//! - `unflattener.rs` - column-keyed result rows back to nested records

mod flattener;
mod mapping;
mod unflattener;
mod validator;

pub use flattener::flatten_batch;
pub use mapping::{ColumnMapping, sanitize_path};
pub use unflattener::{unflatten_row, unflatten_rows};
pub use validator::validate_batch;
