//! Store input and listing types.

/// One key as accepted at the ingestion boundary: already base64-decoded
/// and length-validated before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKey {
    pub key_data: Vec<u8>,
    pub rolling_start_interval_number: u32,
    pub rolling_period: u32,
    pub transmission_risk_level: i32,
}

/// Catalog entry for one downloadable package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub package_id: i64,
    pub region: String,
    /// Earliest ingestion time among the package's keys, seconds since
    /// epoch.
    pub created_at: i64,
}
