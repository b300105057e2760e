//! Client-side table engine
//!
//! Search, column filters, single-column sort, pagination and row selection
//! over a caller-supplied row collection. The engine produces a read-only
//! [`TableView`] for a rendering layer and never performs I/O.

pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod selection;

mod engine;

pub use config::TableConfig;
pub use engine::*;
