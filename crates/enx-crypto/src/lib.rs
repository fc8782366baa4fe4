//! Signing key handling for export packages.
//!
//! Loads a long-lived EC private key from a PEM file at startup and signs
//! export payloads with ECDSA P-256 + SHA-256. The loaded key is immutable
//! and safe to share across concurrent package builds.

pub mod error;
pub mod signing;

pub use error::{SignatureKeyError, SigningError};
pub use signing::{load_signing_key, parse_signing_key_pem, sign, verify};

pub use p256::ecdsa::{SigningKey, VerifyingKey};

/// OID for ecdsa-with-SHA256, the scheme every package signature uses.
pub const ECDSA_P256_SHA256_OID: &str = "1.2.840.10045.4.3.2";
