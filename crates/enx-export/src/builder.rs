//! Export message assembly.

use crate::error::ExportError;
use crate::types::KeyRecord;
use crate::window::ExportWindow;
use crate::wire::{SignatureInfo, TemporaryExposureKey, TemporaryExposureKeyExport};

/// Assemble the export message for one batch of records.
///
/// The batch must be non-empty and single-region; key entries preserve
/// the input order. Packages are always single-batch here, so
/// `batch_num` and `batch_size` are both 1.
pub fn build_export_message(
    records: &[KeyRecord],
    window: ExportWindow,
    signature_info: SignatureInfo,
) -> Result<TemporaryExposureKeyExport, ExportError> {
    let Some(first) = records.first() else {
        return Err(ExportError::EmptyBatch);
    };
    if let Some(other) = records.iter().find(|r| r.region != first.region) {
        return Err(ExportError::MixedRegions {
            expected: first.region.clone(),
            got: other.region.clone(),
        });
    }

    let keys = records
        .iter()
        .map(|record| TemporaryExposureKey {
            key_data: Some(record.key_data.clone()),
            transmission_risk_level: Some(record.transmission_risk_level),
            rolling_start_interval_number: Some(record.rolling_start_interval_number),
            rolling_period: Some(record.rolling_period),
        })
        .collect();

    Ok(TemporaryExposureKeyExport {
        start_timestamp: Some(window.start_timestamp),
        end_timestamp: Some(window.end_timestamp),
        region: Some(first.region.clone()),
        batch_num: Some(1),
        batch_size: Some(1),
        signature_infos: vec![signature_info],
        keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{DEFAULT_ROLLING_PERIOD, KEY_LENGTH};

    fn record(id: i64, region: &str, first_byte: u8) -> KeyRecord {
        let mut key_data = vec![0u8; KEY_LENGTH];
        key_data[0] = first_byte;
        KeyRecord {
            id,
            created_at: 1_598_922_000,
            region: region.to_string(),
            key_data,
            rolling_start_interval_number: 2_654_784,
            rolling_period: DEFAULT_ROLLING_PERIOD,
            transmission_risk_level: 2,
        }
    }

    fn window() -> ExportWindow {
        ExportWindow {
            start_timestamp: 1_598_886_000,
            end_timestamp: 1_598_972_400,
        }
    }

    fn signature_info() -> SignatureInfo {
        SignatureInfo {
            verification_key_version: Some("v1".to_string()),
            verification_key_id: Some("440".to_string()),
            signature_algorithm: Some("1.2.840.10045.4.3.2".to_string()),
        }
    }

    #[test]
    fn builds_single_batch_message() {
        let records = vec![record(1, "440", 0xaa)];
        let message = build_export_message(&records, window(), signature_info()).unwrap();

        assert_eq!(message.start_timestamp, Some(1_598_886_000));
        assert_eq!(message.end_timestamp, Some(1_598_972_400));
        assert_eq!(message.region.as_deref(), Some("440"));
        assert_eq!(message.batch_num, Some(1));
        assert_eq!(message.batch_size, Some(1));
        assert_eq!(message.signature_infos.len(), 1);
        assert_eq!(message.keys.len(), 1);
        assert_eq!(message.keys[0].key_data.as_deref().unwrap()[0], 0xaa);
    }

    #[test]
    fn preserves_record_order() {
        let records = vec![
            record(1, "440", 0x0a),
            record(2, "440", 0x0b),
            record(3, "440", 0x0c),
        ];
        let message = build_export_message(&records, window(), signature_info()).unwrap();
        let first_bytes: Vec<u8> = message
            .keys
            .iter()
            .map(|k| k.key_data.as_deref().unwrap()[0])
            .collect();
        assert_eq!(first_bytes, vec![0x0a, 0x0b, 0x0c]);
    }

    #[test]
    fn rejects_empty_batch() {
        let err = build_export_message(&[], window(), signature_info()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyBatch));
    }

    #[test]
    fn rejects_mixed_regions() {
        let records = vec![record(1, "440", 0x0a), record(2, "441", 0x0b)];
        let err = build_export_message(&records, window(), signature_info()).unwrap_err();
        match err {
            ExportError::MixedRegions { expected, got } => {
                assert_eq!(expected, "440");
                assert_eq!(got, "441");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
