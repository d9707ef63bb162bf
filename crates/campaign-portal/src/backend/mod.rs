//! Backend abstraction for the two portal tables.
//!
//! - [`RemoteBackend`] talks to the hosted REST endpoint
//! - [`MockBackend`] keeps the tables in memory for tests and dry runs

pub mod mock;
pub mod remote;
pub mod traits;

pub use mock::MockBackend;
pub use remote::RemoteBackend;
pub use traits::PortalBackend;
