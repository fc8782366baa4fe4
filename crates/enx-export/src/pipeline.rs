//! End-to-end package build.
//!
//! fetch → window → message → encode → sign → signature list → archive.
//! No retries: every step is deterministic, so a failed build fails the
//! same way again. A failure yields no partial output.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tracing::debug;

use enx_crypto::{sign, SigningKey, ECDSA_P256_SHA256_OID};

use crate::archive::write_package;
use crate::builder::build_export_message;
use crate::error::ExportError;
use crate::types::KeyRecord;
use crate::window::export_window;
use crate::wire::{
    encode_export, encode_signature_list, SignatureInfo, TekSignature, TekSignatureList,
};

/// Builds and signs export packages.
///
/// Holds the process-wide signing key plus the static identifiers that
/// correlate its signatures to a known public key. The key is loaded once
/// at startup and shared read-only across concurrent builds; ECDSA
/// signing never mutates it, so no locking is needed.
#[derive(Clone)]
pub struct ExportSigner {
    signing_key: Arc<SigningKey>,
    verification_key_id: String,
    verification_key_version: String,
}

impl ExportSigner {
    pub fn new(
        signing_key: SigningKey,
        verification_key_id: impl Into<String>,
        verification_key_version: impl Into<String>,
    ) -> Self {
        Self {
            signing_key: Arc::new(signing_key),
            verification_key_id: verification_key_id.into(),
            verification_key_version: verification_key_version.into(),
        }
    }

    /// The signature descriptor embedded in every package this signer
    /// produces.
    pub fn signature_info(&self) -> SignatureInfo {
        SignatureInfo {
            verification_key_version: Some(self.verification_key_version.clone()),
            verification_key_id: Some(self.verification_key_id.clone()),
            signature_algorithm: Some(ECDSA_P256_SHA256_OID.to_string()),
        }
    }

    /// Sign already-encoded export bytes and wrap the signature.
    ///
    /// The signature covers the exact bytes passed in; callers must not
    /// re-encode the message afterward.
    pub fn sign_export(&self, export_bytes: &[u8]) -> Result<TekSignatureList, ExportError> {
        if export_bytes.is_empty() {
            return Err(ExportError::EmptyPayload);
        }
        let signature = sign(&self.signing_key, export_bytes)?;
        Ok(TekSignatureList {
            signatures: vec![TekSignature {
                signature_info: Some(self.signature_info()),
                signature: Some(signature),
            }],
        })
    }

    /// Build the complete signed package for one batch of records.
    ///
    /// `reference` is the instant the export window is derived from
    /// (the batch's representative creation time); passing it in keeps
    /// the build free of ambient clock reads.
    pub fn build_package<Tz: TimeZone>(
        &self,
        records: &[KeyRecord],
        reference: &DateTime<Tz>,
    ) -> Result<Vec<u8>, ExportError> {
        let window = export_window(reference);
        let message = build_export_message(records, window, self.signature_info())?;
        let export_bytes = encode_export(&message)?;
        let signature_list = self.sign_export(&export_bytes)?;
        let signature_bytes = encode_signature_list(&signature_list)?;
        debug!(
            keys = records.len(),
            start = window.start_timestamp,
            end = window.end_timestamp,
            "built signed export package"
        );
        write_package(&export_bytes, &signature_bytes)
    }
}
