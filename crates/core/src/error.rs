/// All fatal failures the migration workflow can report.
///
/// Non-fatal conditions are deliberately absent: an unresolved group
/// or device lookup is `Ok(None)` from the resolver, and a rejected
/// assignment is `Ok(false)` from the assigner. Everything here aborts
/// the run when it reaches the driver.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Connection-level failure issuing a request (DNS, TCP, TLS, IO).
    #[error("transport error on {system} during {operation}: {message}")]
    Transport {
        system: String,
        operation: String,
        message: String,
    },

    /// A structural call (list, lookup, create, search) returned a
    /// status other than the one the workflow requires.
    #[error("unexpected status on {system} while {operation}: expected {expected}, got {actual}")]
    UnexpectedStatus {
        system: String,
        operation: String,
        expected: u16,
        actual: u16,
    },

    /// A response body could not be decoded, or a creation response
    /// lacked the identifier the workflow needs.
    #[error("malformed response while {operation}: {message}")]
    Decode { operation: String, message: String },

    /// The credential key file could not be read or parsed.
    #[error("could not load key file '{path}': {message}")]
    KeyFile { path: String, message: String },
}
