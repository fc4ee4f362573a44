//! End-to-end import: CSV text or file → header checks → typed items.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use merchimport_shared::{ImportConfig, ImportKind, ImportedItems, MerchImportError, Result};

use crate::csv_parser::{ParseOptions, parse_csv};
use crate::headers::{missing_headers, unrecognized_headers};
use crate::mappers::map_for_kind;
use crate::records::rows_to_records;

/// Result of a successful import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    /// Target content block.
    pub kind: ImportKind,
    /// Required headers the file lacked. Their fields were defaulted.
    pub missing_headers: Vec<String>,
    /// Headers present in the file that no field is read from.
    pub unrecognized_headers: Vec<String>,
    /// Data rows parsed below the header row.
    pub row_count: usize,
    /// Mapped items, one per data row.
    pub items: ImportedItems,
}

/// Import CSV text already in memory.
///
/// Fails only when no item could be produced; every field-level problem is
/// defaulted by the mappers.
#[instrument(skip_all, fields(kind = %kind, bytes = content.len()))]
pub fn import_str(kind: ImportKind, content: &str, config: &ImportConfig) -> Result<ImportOutcome> {
    let rows = parse_csv(content, &ParseOptions::from(config));
    debug!(rows = rows.len(), "parsed CSV rows");

    let (missing, unrecognized) = match rows.first() {
        Some(header) => (
            missing_headers(header, kind.required_headers()),
            unrecognized_headers(header, kind),
        ),
        None => (
            kind.required_headers().iter().map(|h| h.to_string()).collect(),
            Vec::new(),
        ),
    };
    if !missing.is_empty() {
        warn!(?missing, "CSV header row lacks required columns");
    }
    if !unrecognized.is_empty() {
        debug!(?unrecognized, "ignoring unrecognized columns");
    }

    let records = rows_to_records(&rows);
    let id_field = kind.id_field();
    let blank_ids = records
        .iter()
        .filter(|r| r.get_non_empty(id_field).is_none())
        .count();
    if blank_ids > 0 {
        warn!(blank_ids, id_field, "rows without an identifying code");
    }

    let items = map_for_kind(kind, &records);
    if items.is_empty() {
        return Err(MerchImportError::NoValidRows { kind });
    }

    info!(items = items.len(), "mapped CSV rows");

    Ok(ImportOutcome {
        kind,
        missing_headers: missing,
        unrecognized_headers: unrecognized,
        row_count: records.len(),
        items,
    })
}

/// Import a CSV file from disk after checking its extension and size.
#[instrument(skip_all, fields(kind = %kind, path = %path.display()))]
pub fn import_file(kind: ImportKind, path: &Path, config: &ImportConfig) -> Result<ImportOutcome> {
    check_extension(path, config)?;

    let size = std::fs::metadata(path)
        .map_err(|e| MerchImportError::io(path, e))?
        .len();
    if size > config.max_file_bytes {
        return Err(MerchImportError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_bytes,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| MerchImportError::io(path, e))?;
    // Spreadsheet exports often lead with a byte-order mark.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    import_str(kind, content, config)
}

fn check_extension(path: &Path, config: &ImportConfig) -> Result<()> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            config
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        });

    if accepted {
        Ok(())
    } else {
        Err(MerchImportError::UnsupportedFile {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(content).expect("write temp file");
        file
    }

    #[test]
    fn import_best_seller_fixture() {
        let content = std::fs::read_to_string("../../../fixtures/csv/best-sellers.csv")
            .expect("read fixture");
        let outcome =
            import_str(ImportKind::BestSeller, &content, &ImportConfig::default()).unwrap();

        assert!(outcome.missing_headers.is_empty());
        let ImportedItems::BestSeller(items) = &outcome.items else {
            panic!("expected best-seller items, got {:?}", outcome.items.kind());
        };
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].p_code, "SKU100");
        assert_eq!(items[1].metadata.tagline, None);
        assert_eq!(items[2].p_code, "SKU,300");
        assert_eq!(items[3].position, 4);
    }

    #[test]
    fn report_carries_row_count() {
        let outcome = import_str(
            ImportKind::PopularCategory,
            "sub_category_id,position
SUB-A,1

,2
SUB-C,3
",
            &ImportConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome.row_count, 3);
        assert_eq!(outcome.items.len(), 3);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["row_count"], 3);
        assert_eq!(json["kind"], "popular-category");
    }

    #[test]
    fn empty_result_is_an_error() {
        let err = import_str(
            ImportKind::SeasonalCategory,
            "sub_category_id,position\n",
            &ImportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MerchImportError::NoValidRows {
                kind: ImportKind::SeasonalCategory
            }
        ));
        assert_eq!(err.to_string(), "no valid subcategories found in CSV");
    }

    #[test]
    fn missing_id_column_is_reported_not_fatal() {
        let outcome = import_str(
            ImportKind::Advertisement,
            "sku,position\nA,1\n",
            &ImportConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome.missing_headers, vec!["p_code"]);
        assert_eq!(outcome.unrecognized_headers, vec!["sku"]);
        assert_eq!(outcome.items.len(), 1);
    }

    #[test]
    fn multiline_option_is_honoured() {
        let content = "p_code,redirect_url\n\"SKU\n1\",/p/1\n";

        let line_mode = import_str(ImportKind::Advertisement, content, &ImportConfig::default())
            .unwrap();
        assert_eq!(line_mode.items.len(), 2);

        let config = ImportConfig {
            multiline_quotes: true,
            ..ImportConfig::default()
        };
        let outcome = import_str(ImportKind::Advertisement, content, &config).unwrap();
        let ImportedItems::Advertisement(items) = outcome.items else {
            panic!("expected advertisement items");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].p_code, "SKU\n1");
        assert_eq!(items[0].redirect_url, "/p/1");
    }

    #[test]
    fn import_file_strips_bom() {
        let file = write_temp(".csv", "\u{feff}p_code,position\nSKU1,5\n".as_bytes());
        let outcome =
            import_file(ImportKind::TopSeller, file.path(), &ImportConfig::default()).unwrap();
        assert!(outcome.missing_headers.is_empty());
        let ImportedItems::TopSeller(items) = outcome.items else {
            panic!("expected top-seller items");
        };
        assert_eq!(items[0].p_code, "SKU1");
        assert_eq!(items[0].position, 5);
    }

    #[test]
    fn import_file_rejects_other_extensions() {
        let file = write_temp(".xlsx", b"p_code\nSKU1\n");
        let err =
            import_file(ImportKind::TopSeller, file.path(), &ImportConfig::default()).unwrap_err();
        assert!(matches!(err, MerchImportError::UnsupportedFile { .. }));
    }

    #[test]
    fn import_file_accepts_uppercase_extension() {
        let file = write_temp(".CSV", b"p_code\nSKU1\n");
        let outcome =
            import_file(ImportKind::TopSeller, file.path(), &ImportConfig::default()).unwrap();
        assert_eq!(outcome.items.len(), 1);
    }

    #[test]
    fn import_file_enforces_size_limit() {
        let file = write_temp(".csv", b"p_code\nSKU1\nSKU2\n");
        let config = ImportConfig {
            max_file_bytes: 8,
            ..ImportConfig::default()
        };
        let err = import_file(ImportKind::BestSeller, file.path(), &config).unwrap_err();
        assert!(matches!(
            err,
            MerchImportError::FileTooLarge { size: 17, limit: 8, .. }
        ));
    }

    #[test]
    fn import_file_missing_path_is_io_error() {
        let err = import_file(
            ImportKind::BestSeller,
            Path::new("/nonexistent/products.csv"),
            &ImportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MerchImportError::Io { .. }));
    }
}
