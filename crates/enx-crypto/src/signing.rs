//! ECDSA P-256 signing and verification over export payload bytes.
//!
//! Signatures are ASN.1 DER ECDSA-Sig-Value bytes, the form client
//! verifiers expect for the declared `1.2.840.10045.4.3.2` algorithm.

use std::fs;
use std::path::Path;

use ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::DecodePrivateKey;
use p256::SecretKey;

use crate::error::{SignatureKeyError, SigningError};

/// Load the signing key from a PEM file.
///
/// Accepts SEC1 ("EC PRIVATE KEY") and PKCS#8 ("PRIVATE KEY") bodies,
/// tried in that order. Any failure here is a startup-fatal condition.
pub fn load_signing_key(path: &Path) -> Result<SigningKey, SignatureKeyError> {
    let pem = fs::read_to_string(path).map_err(|source| SignatureKeyError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    parse_signing_key_pem(&pem)
}

/// Parse a PEM-encoded P-256 private key.
pub fn parse_signing_key_pem(pem: &str) -> Result<SigningKey, SignatureKeyError> {
    let secret = SecretKey::from_sec1_pem(pem)
        .or_else(|_| SecretKey::from_pkcs8_pem(pem))
        .map_err(|e| SignatureKeyError::InvalidPem(e.to_string()))?;
    Ok(SigningKey::from(secret))
}

/// Sign a message with ECDSA P-256 + SHA-256.
///
/// Returns the DER-encoded signature bytes. Signing is deterministic
/// (RFC 6979 nonces), so the same key and message always produce the
/// same bytes.
pub fn sign(key: &SigningKey, message: &[u8]) -> Result<Vec<u8>, SigningError> {
    let signature: Signature = key
        .try_sign(message)
        .map_err(|e| SigningError(e.to_string()))?;
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify a DER-encoded ECDSA P-256 + SHA-256 signature.
///
/// Returns false on any malformed input (never errors on an invalid
/// signature).
pub fn verify(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    match Signature::from_der(signature) {
        Ok(sig) => key.verify(message, &sig).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::pkcs8::{EncodePrivateKey, LineEnding};
    use std::io::Write;

    /// Fixed scalar, well below the P-256 group order.
    fn test_key() -> SigningKey {
        let scalar: Vec<u8> = (1..=32).collect();
        SigningKey::from_slice(&scalar).unwrap()
    }

    fn other_key() -> SigningKey {
        let scalar: Vec<u8> = (101..=132).collect();
        SigningKey::from_slice(&scalar).unwrap()
    }

    #[test]
    fn sign_verify_round_trip() {
        let key = test_key();
        let message = b"export payload bytes";

        let signature = sign(&key, message).unwrap();
        assert!(verify(key.verifying_key(), message, &signature));
    }

    #[test]
    fn signature_is_der() {
        let key = test_key();
        let signature = sign(&key, b"payload").unwrap();
        // DER ECDSA-Sig-Value starts with a SEQUENCE tag
        assert_eq!(signature[0], 0x30);
    }

    #[test]
    fn deterministic_signatures() {
        let key = test_key();
        let a = sign(&key, b"payload").unwrap();
        let b = sign(&key, b"payload").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn wrong_message_fails() {
        let key = test_key();
        let signature = sign(&key, b"original").unwrap();
        assert!(!verify(key.verifying_key(), b"tampered", &signature));
    }

    #[test]
    fn wrong_key_fails() {
        let signature = sign(&test_key(), b"payload").unwrap();
        assert!(!verify(other_key().verifying_key(), b"payload", &signature));
    }

    #[test]
    fn garbage_signature_fails() {
        let key = test_key();
        assert!(!verify(key.verifying_key(), b"payload", &[0u8; 70]));
    }

    #[test]
    fn loads_sec1_pem() {
        let scalar: Vec<u8> = (1..=32).collect();
        let secret = SecretKey::from_slice(&scalar).unwrap();
        let pem = secret.to_sec1_pem(LineEnding::LF).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(pem.as_bytes()).unwrap();

        let loaded = load_signing_key(file.path()).unwrap();
        assert_eq!(loaded.verifying_key(), test_key().verifying_key());
    }

    #[test]
    fn loads_pkcs8_pem() {
        let scalar: Vec<u8> = (1..=32).collect();
        let secret = SecretKey::from_slice(&scalar).unwrap();
        let pem = secret.to_pkcs8_pem(LineEnding::LF).unwrap();

        let loaded = parse_signing_key_pem(&pem).unwrap();
        assert_eq!(loaded.verifying_key(), test_key().verifying_key());
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = load_signing_key(Path::new("/nonexistent/signing.pem")).unwrap_err();
        assert!(matches!(err, SignatureKeyError::Unreadable { .. }));
    }

    #[test]
    fn garbage_pem_is_rejected() {
        let err = parse_signing_key_pem("not a pem at all").unwrap_err();
        assert!(matches!(err, SignatureKeyError::InvalidPem(_)));
    }
}
