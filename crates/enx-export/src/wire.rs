//! Binary wire format for export packages.
//!
//! The message layout is shared with the wider exposure-notification
//! client ecosystem: field numbers, wire types, and nesting are externally
//! fixed and must not drift. The structs below are written against those
//! fixed tags directly; prost encodes fields in tag order and preserves
//! repeated-field order, so encoding the same logical message twice yields
//! identical bytes.
//!
//! All fields are proto2-style optional; unset fields are omitted from the
//! encoding. `SignatureInfo` tags 1-2 and signature-entry tags 2-3 are
//! reserved by the ecosystem format (retired fields and the multi-batch
//! extension) and are never set here.

use prost::Message;

use crate::error::ExportError;

/// Required length of raw key material, in bytes.
pub const KEY_LENGTH: usize = 16;

/// Nominal key lifetime in 10-minute intervals (~24h).
pub const DEFAULT_ROLLING_PERIOD: u32 = 144;

/// The export payload: window metadata plus one entry per exposure key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemporaryExposureKeyExport {
    /// Window start, seconds since epoch.
    #[prost(int64, optional, tag = "1")]
    pub start_timestamp: ::core::option::Option<i64>,
    /// Window end, seconds since epoch.
    #[prost(int64, optional, tag = "2")]
    pub end_timestamp: ::core::option::Option<i64>,
    #[prost(string, optional, tag = "3")]
    pub region: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "4")]
    pub batch_num: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub batch_size: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "6")]
    pub signature_infos: ::prost::alloc::vec::Vec<SignatureInfo>,
    #[prost(message, repeated, tag = "7")]
    pub keys: ::prost::alloc::vec::Vec<TemporaryExposureKey>,
}

/// One published exposure key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemporaryExposureKey {
    /// Raw key material, exactly [`KEY_LENGTH`] bytes.
    #[prost(bytes = "vec", optional, tag = "1")]
    pub key_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(int32, optional, tag = "2")]
    pub transmission_risk_level: ::core::option::Option<i32>,
    /// 10-minute intervals since epoch at which the key became active.
    #[prost(uint32, optional, tag = "3")]
    pub rolling_start_interval_number: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "4", default = "144")]
    pub rolling_period: ::core::option::Option<u32>,
}

/// Identifies which public key and algorithm a signature corresponds to.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureInfo {
    #[prost(string, optional, tag = "3")]
    pub verification_key_version: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "4")]
    pub verification_key_id: ::core::option::Option<::prost::alloc::string::String>,
    /// OID naming the exact signature scheme.
    #[prost(string, optional, tag = "5")]
    pub signature_algorithm: ::core::option::Option<::prost::alloc::string::String>,
}

/// Detached signature wrapper, one entry per configured signing key.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TekSignatureList {
    #[prost(message, repeated, tag = "1")]
    pub signatures: ::prost::alloc::vec::Vec<TekSignature>,
}

/// One signature over the exact serialized export bytes.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TekSignature {
    #[prost(message, optional, tag = "1")]
    pub signature_info: ::core::option::Option<SignatureInfo>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub signature: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

/// Serialize an export message after validating it is well-formed.
///
/// Fails if a required field is absent, the key list is empty, or any key
/// is not exactly [`KEY_LENGTH`] bytes.
pub fn encode_export(message: &TemporaryExposureKeyExport) -> Result<Vec<u8>, ExportError> {
    if message.start_timestamp.is_none() {
        return Err(ExportError::MissingField("start_timestamp"));
    }
    if message.end_timestamp.is_none() {
        return Err(ExportError::MissingField("end_timestamp"));
    }
    if message.region.is_none() {
        return Err(ExportError::MissingField("region"));
    }
    if message.batch_num.is_none() {
        return Err(ExportError::MissingField("batch_num"));
    }
    if message.batch_size.is_none() {
        return Err(ExportError::MissingField("batch_size"));
    }
    if message.keys.is_empty() {
        return Err(ExportError::EmptyBatch);
    }
    for key in &message.keys {
        let Some(key_data) = key.key_data.as_deref() else {
            return Err(ExportError::MissingField("key_data"));
        };
        if key_data.len() != KEY_LENGTH {
            return Err(ExportError::InvalidKeyLength {
                expected: KEY_LENGTH,
                got: key_data.len(),
            });
        }
        if key.rolling_start_interval_number.is_none() {
            return Err(ExportError::MissingField("rolling_start_interval_number"));
        }
        if key.rolling_period.is_none() {
            return Err(ExportError::MissingField("rolling_period"));
        }
    }
    Ok(message.encode_to_vec())
}

/// Serialize a signature list after validating it is well-formed.
pub fn encode_signature_list(list: &TekSignatureList) -> Result<Vec<u8>, ExportError> {
    if list.signatures.is_empty() {
        return Err(ExportError::MissingField("signatures"));
    }
    for entry in &list.signatures {
        if entry.signature_info.is_none() {
            return Err(ExportError::MissingField("signature_info"));
        }
        if entry.signature.as_deref().map_or(true, |s| s.is_empty()) {
            return Err(ExportError::MissingField("signature"));
        }
    }
    Ok(list.encode_to_vec())
}
