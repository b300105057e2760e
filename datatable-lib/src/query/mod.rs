//! Pipeline stages: filter, sort and paginate.
//!
//! Each stage is a pure function over borrowed rows, so the stages can be
//! used on their own or composed by [`TableEngine`](crate::TableEngine).

mod filter;
mod order;
mod page;

pub use filter::*;
pub use order::*;
pub use page::*;
