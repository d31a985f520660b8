//! HTTP implementation of [`SystemApi`] over a blocking `ureq` agent.
//!
//! Credentials come from a JSON key file `{"host": ..., "api_key": ...}`;
//! every request carries a bearer token. The agent is configured so
//! non-2xx statuses come back as responses rather than errors — the
//! workflow inspects raw status codes itself.

use std::path::Path;

use serde::Deserialize;

use crate::api::{ApiResponse, SystemApi};
use crate::error::MigrateError;

/// Contents of a credential key file.
#[derive(Debug, Deserialize)]
struct KeyFile {
    host: String,
    api_key: String,
}

/// An authenticated `ureq` client for one system instance.
#[derive(Debug)]
pub struct RestClient {
    label: String,
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl RestClient {
    /// Load credentials from `path` and build a client labeled `label`.
    pub fn from_key_file(path: &Path, label: &str) -> Result<Self, MigrateError> {
        let key_file = |message: String| MigrateError::KeyFile {
            path: path.display().to_string(),
            message,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| key_file(e.to_string()))?;
        let key: KeyFile = serde_json::from_str(&raw).map_err(|e| key_file(e.to_string()))?;

        Ok(Self::new(&key.host, &key.api_key, label))
    }

    /// Build a client directly from a host and API key.
    ///
    /// A bare hostname gets an `https://` scheme; a host with an
    /// explicit scheme is used as-is.
    pub fn new(host: &str, api_key: &str, label: &str) -> Self {
        let root = host.trim_end_matches('/');
        let root = if root.contains("://") {
            root.to_string()
        } else {
            format!("https://{root}")
        };

        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        RestClient {
            label: label.to_string(),
            base_url: format!("{root}/api/v1"),
            api_key: api_key.to_string(),
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transport(&self, method: &str, path: &str, message: String) -> MigrateError {
        MigrateError::Transport {
            system: self.label.clone(),
            operation: format!("{method} {path}"),
            message,
        }
    }

    /// Read the response out fully; the connection is back in the pool
    /// before the next call regardless of status.
    fn read_response(
        &self,
        method: &str,
        path: &str,
        response: ureq::http::Response<ureq::Body>,
    ) -> Result<ApiResponse, MigrateError> {
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get("location")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = response
            .into_body()
            .read_to_vec()
            .map_err(|e| self.transport(method, path, e.to_string()))?;

        Ok(ApiResponse {
            status,
            location,
            body,
        })
    }
}

impl SystemApi for RestClient {
    fn label(&self) -> &str {
        &self.label
    }

    fn get(&self, path: &str) -> Result<ApiResponse, MigrateError> {
        let response = self
            .agent
            .get(&self.url(path))
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .call()
            .map_err(|e| self.transport("GET", path, e.to_string()))?;

        self.read_response("GET", path, response)
    }

    fn post(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse, MigrateError> {
        let response = self
            .agent
            .post(&self.url(path))
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send_json(body)
            .map_err(|e| self.transport("POST", path, e.to_string()))?;

        self.read_response("POST", path, response)
    }
}
