//! Signed exposure-key export packages.
//!
//! Takes an ordered batch of previously-published exposure keys and a
//! loaded signing key, and produces the downloadable package: a zip with
//! two members, the binary-encoded key export (`export.bin`) and a
//! detached signature list over those exact bytes (`export.sig`).
//!
//! Pipeline: records → window → export message → encode → sign →
//! signature list → encode → archive. Every step is a pure transform;
//! encoding the same logical message twice is guaranteed byte-identical,
//! which is what keeps the detached signature verifiable.

pub mod archive;
pub mod builder;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod window;
pub mod wire;

pub use archive::{write_package, EXPORT_BIN_NAME, EXPORT_SIG_NAME};
pub use builder::build_export_message;
pub use error::ExportError;
pub use pipeline::ExportSigner;
pub use types::KeyRecord;
pub use window::{export_window, ExportWindow, EXPORT_WINDOW_SECONDS};
pub use wire::{
    encode_export, encode_signature_list, SignatureInfo, TekSignature, TekSignatureList,
    TemporaryExposureKey, TemporaryExposureKeyExport, DEFAULT_ROLLING_PERIOD, KEY_LENGTH,
};
