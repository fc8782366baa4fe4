//! Two-member zip assembly.
//!
//! Consumers unpack exactly these member names; renaming either breaks
//! every deployed client. Archive timestamps are pinned so the same
//! inputs always produce the same archive bytes.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime as ZipDateTime, ZipWriter};

use crate::error::ExportError;

/// Archive member holding the encoded export message.
pub const EXPORT_BIN_NAME: &str = "export.bin";

/// Archive member holding the encoded signature list.
pub const EXPORT_SIG_NAME: &str = "export.sig";

/// Package the two encoded binaries into a deflate-compressed zip.
///
/// Member order is `export.bin` then `export.sig`. Both inputs must be
/// non-empty; a partial package must never reach a client.
pub fn write_package(export_bytes: &[u8], signature_bytes: &[u8]) -> Result<Vec<u8>, ExportError> {
    if export_bytes.is_empty() || signature_bytes.is_empty() {
        return Err(ExportError::EmptyPayload);
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(archive_timestamp())
        .unix_permissions(0o644);

    writer.start_file(EXPORT_BIN_NAME, options)?;
    writer.write_all(export_bytes)?;
    writer.start_file(EXPORT_SIG_NAME, options)?;
    writer.write_all(signature_bytes)?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

fn archive_timestamp() -> ZipDateTime {
    ZipDateTime::from_date_and_time(1980, 1, 1, 0, 0, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn round_trips_both_members() {
        let export = b"export message bytes".to_vec();
        let signature = b"signature list bytes".to_vec();
        let package = write_package(&export, &signature).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut export_out = Vec::new();
        archive
            .by_name(EXPORT_BIN_NAME)
            .unwrap()
            .read_to_end(&mut export_out)
            .unwrap();
        assert_eq!(export_out, export);

        let mut signature_out = Vec::new();
        archive
            .by_name(EXPORT_SIG_NAME)
            .unwrap()
            .read_to_end(&mut signature_out)
            .unwrap();
        assert_eq!(signature_out, signature);
    }

    #[test]
    fn member_order_is_fixed() {
        let package = write_package(b"a", b"b").unwrap();
        let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().name(), EXPORT_BIN_NAME);
        assert_eq!(archive.by_index(1).unwrap().name(), EXPORT_SIG_NAME);
    }

    #[test]
    fn identical_inputs_identical_bytes() {
        let a = write_package(b"export", b"sig").unwrap();
        let b = write_package(b"export", b"sig").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_empty_export() {
        assert!(matches!(
            write_package(b"", b"sig").unwrap_err(),
            ExportError::EmptyPayload
        ));
    }

    #[test]
    fn rejects_empty_signature() {
        assert!(matches!(
            write_package(b"export", b"").unwrap_err(),
            ExportError::EmptyPayload
        ));
    }
}
