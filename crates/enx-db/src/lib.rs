//! SQLite-backed key record store.
//!
//! Persists submitted exposure keys one row per key, grouped into
//! packages by submission. The export core never sees this layer; it is
//! handed ordered [`enx_export::KeyRecord`] batches fetched from here.

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::TekStore;
pub use types::{NewKey, PackageSummary};
