//! Header-keyed records → typed merchandising items.
//!
//! Every mapper shares the same defaulting rules:
//!
//! | Field | Source column | Fallback |
//! |-------|---------------|----------|
//! | `p_code` / `sub_category_id` | same name | `""` |
//! | `position` | `position`, parsed as integer | row index + 1 |
//! | `redirect_url` | `redirect_url` | `""` |
//! | `metadata.badge`, `metadata.tagline`, `store_code` | same name | unset when empty |
//! | `metadata.highlight` | `highlight` is `true` or `1` | `false` |
//!
//! Mapping never fails; rows with an empty identifying code are kept and left
//! for the caller to filter at submission time.

use merchimport_shared::{
    AdvertisementProduct, BestSellerProduct, CategoryMetadata, EmptyMetadata, HeaderKeyedRecord,
    ImportKind, ImportedItems, PopularCategoryItem, ProductMetadata, SeasonalCategoryItem,
    TopSellerProduct,
};

use tracing::debug;

use crate::csv_parser::{ParseOptions, parse_csv};
use crate::records::rows_to_records;

/// Maps one header-keyed record into one item of a fixed shape.
pub trait DomainMapper {
    /// The item shape this mapper produces.
    type Item;

    /// The import kind this mapper serves.
    const KIND: ImportKind;

    /// Map the record at zero-based `index` among the data rows.
    fn map_record(record: &HeaderKeyedRecord, index: usize) -> Self::Item;
}

pub struct BestSellerMapper;
pub struct TopSellerMapper;
pub struct AdvertisementMapper;
pub struct PopularCategoryMapper;
pub struct SeasonalCategoryMapper;

impl DomainMapper for BestSellerMapper {
    type Item = BestSellerProduct;
    const KIND: ImportKind = ImportKind::BestSeller;

    fn map_record(record: &HeaderKeyedRecord, index: usize) -> Self::Item {
        BestSellerProduct {
            p_code: text(record, "p_code"),
            position: position(record, index),
            metadata: product_metadata(record),
            redirect_url: text(record, "redirect_url"),
        }
    }
}

impl DomainMapper for TopSellerMapper {
    type Item = TopSellerProduct;
    const KIND: ImportKind = ImportKind::TopSeller;

    fn map_record(record: &HeaderKeyedRecord, index: usize) -> Self::Item {
        TopSellerProduct {
            p_code: text(record, "p_code"),
            position: position(record, index),
            metadata: product_metadata(record),
            redirect_url: text(record, "redirect_url"),
        }
    }
}

impl DomainMapper for AdvertisementMapper {
    type Item = AdvertisementProduct;
    const KIND: ImportKind = ImportKind::Advertisement;

    fn map_record(record: &HeaderKeyedRecord, index: usize) -> Self::Item {
        AdvertisementProduct {
            p_code: text(record, "p_code"),
            position: position(record, index),
            redirect_url: text(record, "redirect_url"),
            metadata: EmptyMetadata::default(),
        }
    }
}

impl DomainMapper for PopularCategoryMapper {
    type Item = PopularCategoryItem;
    const KIND: ImportKind = ImportKind::PopularCategory;

    fn map_record(record: &HeaderKeyedRecord, index: usize) -> Self::Item {
        PopularCategoryItem {
            sub_category_id: text(record, "sub_category_id"),
            position: position(record, index),
            metadata: CategoryMetadata {
                badge: optional(record, "badge"),
                highlight: highlight(record),
            },
            redirect_url: text(record, "redirect_url"),
            store_code: optional(record, "store_code"),
        }
    }
}

impl DomainMapper for SeasonalCategoryMapper {
    type Item = SeasonalCategoryItem;
    const KIND: ImportKind = ImportKind::SeasonalCategory;

    fn map_record(record: &HeaderKeyedRecord, index: usize) -> Self::Item {
        SeasonalCategoryItem {
            sub_category_id: text(record, "sub_category_id"),
            position: position(record, index),
            redirect_url: text(record, "redirect_url"),
            metadata: EmptyMetadata::default(),
            store_code: optional(record, "store_code"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn text(record: &HeaderKeyedRecord, header: &str) -> String {
    record.get(header).unwrap_or_default().to_string()
}

fn optional(record: &HeaderKeyedRecord, header: &str) -> Option<String> {
    record.get_non_empty(header).map(str::to_string)
}

/// The `position` column as a whole integer. Anything else, including
/// non-integer numbers such as `1.5`, counts as absent and falls back to the
/// 1-based row number.
fn position(record: &HeaderKeyedRecord, index: usize) -> i64 {
    record
        .get_non_empty("position")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(index as i64 + 1)
}

fn highlight(record: &HeaderKeyedRecord) -> bool {
    record
        .get("highlight")
        .map(str::trim)
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn product_metadata(record: &HeaderKeyedRecord) -> ProductMetadata {
    ProductMetadata {
        badge: optional(record, "badge"),
        tagline: optional(record, "tagline"),
        highlight: highlight(record),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Map every record with `M`, passing each its zero-based row index.
pub fn map_records<M: DomainMapper>(records: &[HeaderKeyedRecord]) -> Vec<M::Item> {
    debug!(kind = %M::KIND, records = records.len(), "mapping records");
    records
        .iter()
        .enumerate()
        .map(|(index, record)| M::map_record(record, index))
        .collect()
}

/// Map records into the shape selected at runtime by `kind`.
pub fn map_for_kind(kind: ImportKind, records: &[HeaderKeyedRecord]) -> ImportedItems {
    match kind {
        ImportKind::BestSeller => {
            ImportedItems::BestSeller(map_records::<BestSellerMapper>(records))
        }
        ImportKind::TopSeller => ImportedItems::TopSeller(map_records::<TopSellerMapper>(records)),
        ImportKind::Advertisement => {
            ImportedItems::Advertisement(map_records::<AdvertisementMapper>(records))
        }
        ImportKind::PopularCategory => {
            ImportedItems::PopularCategory(map_records::<PopularCategoryMapper>(records))
        }
        ImportKind::SeasonalCategory => {
            ImportedItems::SeasonalCategory(map_records::<SeasonalCategoryMapper>(records))
        }
    }
}

/// Parse CSV text and map it with `M` in one step.
pub fn parse_items<M: DomainMapper>(content: &str, options: &ParseOptions) -> Vec<M::Item> {
    let rows = parse_csv(content, options);
    map_records::<M>(&rows_to_records(&rows))
}

pub fn parse_best_seller_products(content: &str) -> Vec<BestSellerProduct> {
    parse_items::<BestSellerMapper>(content, &ParseOptions::default())
}

pub fn parse_top_seller_products(content: &str) -> Vec<TopSellerProduct> {
    parse_items::<TopSellerMapper>(content, &ParseOptions::default())
}

pub fn parse_advertisement_products(content: &str) -> Vec<AdvertisementProduct> {
    parse_items::<AdvertisementMapper>(content, &ParseOptions::default())
}

pub fn parse_popular_category_items(content: &str) -> Vec<PopularCategoryItem> {
    parse_items::<PopularCategoryMapper>(content, &ParseOptions::default())
}

pub fn parse_seasonal_category_items(content: &str) -> Vec<SeasonalCategoryItem> {
    parse_items::<SeasonalCategoryMapper>(content, &ParseOptions::default())
}
