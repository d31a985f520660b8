//! Gateway boundary to a monitoring-system REST API.
//!
//! The workflow never talks HTTP directly; it goes through
//! [`SystemApi`], one handle per system instance. The trait returns
//! `Err` only for transport-level failures — every HTTP status comes
//! back as a plain [`ApiResponse`], because status policy belongs to
//! the workflow (most calls require an exact status, assignment merely
//! warns on a mismatch).

use serde::de::DeserializeOwned;

use crate::error::MigrateError;

/// One completed HTTP exchange, with the body fully read so the
/// underlying connection is already released.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// `location` response header, carried by creation responses.
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON, naming `operation` in the error.
    pub fn decode<T: DeserializeOwned>(&self, operation: &str) -> Result<T, MigrateError> {
        serde_json::from_slice(&self.body).map_err(|e| MigrateError::Decode {
            operation: operation.to_string(),
            message: e.to_string(),
        })
    }
}

/// An authenticated handle to one system instance.
pub trait SystemApi {
    /// Human-readable system name used in messages ("source",
    /// "destination").
    fn label(&self) -> &str;

    /// Issue a GET against an API path relative to the instance root.
    fn get(&self, path: &str) -> Result<ApiResponse, MigrateError>;

    /// Issue a POST with a JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse, MigrateError>;
}
