use thiserror::Error;

/// Per-build failures. None of these touch shared state; a failed build
/// produces no partial output and leaves the signing key untouched.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export batch is empty")]
    EmptyBatch,

    #[error("Records span multiple regions: expected {expected}, got {got}")]
    MixedRegions { expected: String, got: String },

    #[error("Invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Refusing to package an empty payload")]
    EmptyPayload,

    #[error(transparent)]
    Signing(#[from] enx_crypto::SigningError),

    #[error("Archive write failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
