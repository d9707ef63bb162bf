//! Core traits for table rows
//!
//! [`Record`] ties a row type to its table so the cache and the backends
//! can treat campaigns and submissions uniformly.

mod record;

pub use record::{find_index, Record};
