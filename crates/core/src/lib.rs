//! Static device-group migration between monitoring system instances.
//!
//! The workflow is a linear, fully synchronous pass: list the source
//! system's device groups, and for each non-dynamic group find or
//! create its destination counterpart, resolve each member device by
//! IPv4 address, and assign the matches into the destination group.
//!
//! Components return structured [`error::MigrateError`] results; only
//! the binary converts a fatal error into a process halt. The gateway
//! to either system is the [`api::SystemApi`] trait, implemented over
//! HTTP by [`client::RestClient`] and by scripted mocks in tests.

pub mod api;
pub mod client;
pub mod error;
pub mod migrate;
pub mod model;

pub use error::MigrateError;
pub use model::MigrationReport;
