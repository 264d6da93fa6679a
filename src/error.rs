//! Error taxonomy for sidecar operations.
//!
//! Every layer surfaces failures to its immediate caller unchanged; no
//! retries and no local recovery happen inside this crate. Retry policy,
//! if any, belongs to the caller.

use thiserror::Error;

/// Errors that can occur while talking to the sidecar or building a
/// transaction.
#[derive(Debug, Error)]
pub enum SidecarError {
    /// Transport-level failure: connection refused, DNS, request timeout.
    #[error("network error talking to sidecar: {0}")]
    Network(#[from] reqwest::Error),

    /// The sidecar answered a read request with a non-success status.
    #[error("sidecar returned status {status}: {body}")]
    Server { status: u16, body: String },

    /// The queried record does not exist on chain.
    #[error("not found: {0}")]
    NotFound(String),

    /// The sidecar's response body did not match the expected shape.
    #[error("invalid sidecar response: {0}")]
    Decode(String),

    /// The codec rejected the call arguments (bad byte lengths, unknown
    /// call, unparsable amount).
    #[error("transaction build failed: {0}")]
    Build(String),

    /// The key capability refused to sign or failed while signing.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The sidecar rejected the signed transaction (stale nonce, invalid
    /// signature, pool full).
    #[error("transaction submission rejected with status {status}: {body}")]
    Submission { status: u16, body: String },

    /// Invalid construction-time configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for sidecar operations.
pub type SidecarResult<T> = Result<T, SidecarError>;
