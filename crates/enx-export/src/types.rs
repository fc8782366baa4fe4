//! Core input types for package builds.

/// One previously-published exposure key, as handed to the package
/// builder by the record source.
///
/// Interval fields are unsigned by construction; `key_data` length is
/// enforced by the encoder. The boundary that accepts submissions is
/// responsible for decoding and validating raw input before a record
/// ever takes this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Opaque identifier assigned at ingestion.
    pub id: i64,
    /// Ingestion time, seconds since epoch.
    pub created_at: i64,
    pub region: String,
    /// Raw key material, expected to be exactly 16 bytes.
    pub key_data: Vec<u8>,
    /// 10-minute intervals since epoch at which the key became active.
    pub rolling_start_interval_number: u32,
    /// Number of 10-minute intervals the key was active.
    pub rolling_period: u32,
    pub transmission_risk_level: i32,
}
