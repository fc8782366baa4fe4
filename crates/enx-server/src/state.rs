use enx_db::TekStore;
use enx_export::ExportSigner;

/// Shared request-handling state. The signer carries the process-wide
/// signing key; both it and the store are safe for concurrent use.
pub struct AppState {
    pub store: TekStore,
    pub signer: ExportSigner,
    pub base_url: String,
}
