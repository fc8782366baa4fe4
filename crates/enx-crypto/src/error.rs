use thiserror::Error;

/// Startup-phase failures. A process that cannot load its signing key must
/// refuse to start rather than serve unsigned packages.
#[derive(Debug, Error)]
pub enum SignatureKeyError {
    #[error("Signature key file {path} could not be read: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Signature key is not a valid EC private key: {0}")]
    InvalidPem(String),
}

/// Per-call signing failure.
#[derive(Debug, Error)]
#[error("Signing failed: {0}")]
pub struct SigningError(pub String);
