//! Core domain types for merchandising CSV imports.

use serde::{Deserialize, Serialize};

use crate::error::MerchImportError;

/// One CSV line split into trimmed fields.
pub type Row = Vec<String>;

// ---------------------------------------------------------------------------
// ImportKind
// ---------------------------------------------------------------------------

/// The merchandising content block an import targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    BestSeller,
    TopSeller,
    Advertisement,
    PopularCategory,
    SeasonalCategory,
}

impl ImportKind {
    /// Every kind, in dashboard menu order.
    pub const ALL: [ImportKind; 5] = [
        ImportKind::BestSeller,
        ImportKind::TopSeller,
        ImportKind::Advertisement,
        ImportKind::PopularCategory,
        ImportKind::SeasonalCategory,
    ];

    /// Stable kebab-case name, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ImportKind::BestSeller => "best-seller",
            ImportKind::TopSeller => "top-seller",
            ImportKind::Advertisement => "advertisement",
            ImportKind::PopularCategory => "popular-category",
            ImportKind::SeasonalCategory => "seasonal-category",
        }
    }

    /// Whether rows identify subcategories rather than products.
    pub fn is_category(self) -> bool {
        matches!(
            self,
            ImportKind::PopularCategory | ImportKind::SeasonalCategory
        )
    }

    /// Header holding the identifying code of each row.
    pub fn id_field(self) -> &'static str {
        if self.is_category() {
            "sub_category_id"
        } else {
            "p_code"
        }
    }

    /// Plural noun used in user-facing messages.
    pub fn item_label(self) -> &'static str {
        if self.is_category() {
            "subcategories"
        } else {
            "products"
        }
    }

    /// Headers that must be present for the import to be meaningful.
    pub fn required_headers(self) -> &'static [&'static str] {
        if self.is_category() {
            &["sub_category_id"]
        } else {
            &["p_code"]
        }
    }

    /// Every header the mapper for this kind reads, in template column order.
    pub fn recognized_headers(self) -> &'static [&'static str] {
        match self {
            ImportKind::BestSeller | ImportKind::TopSeller => &[
                "p_code",
                "position",
                "badge",
                "tagline",
                "highlight",
                "redirect_url",
            ],
            ImportKind::Advertisement => &["p_code", "position", "redirect_url"],
            ImportKind::PopularCategory => &[
                "sub_category_id",
                "position",
                "badge",
                "highlight",
                "redirect_url",
                "store_code",
            ],
            ImportKind::SeasonalCategory => {
                &["sub_category_id", "position", "redirect_url", "store_code"]
            }
        }
    }
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImportKind {
    type Err = MerchImportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ImportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = ImportKind::ALL.iter().map(|k| k.as_str()).collect();
                MerchImportError::validation(format!(
                    "unknown import kind '{s}': expected one of {}",
                    names.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// HeaderKeyedRecord
// ---------------------------------------------------------------------------

/// One data row keyed by the header row, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderKeyedRecord {
    entries: Vec<(String, String)>,
}

impl HeaderKeyedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `header` to `value`. A repeated header keeps its first position
    /// but takes the latest value.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(h, _)| *h == header) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((header, value)),
        }
    }

    /// Value under `header`, or `None` when the column does not exist.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Value under `header` when present and non-empty.
    pub fn get_non_empty(&self, header: &str) -> Option<&str> {
        self.get(header).filter(|v| !v.is_empty())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(h, _)| h.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Display hints carried by best-seller and top-seller products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default)]
    pub highlight: bool,
}

/// Display hints carried by popular-category items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default)]
    pub highlight: bool,
}

/// Metadata for shapes that carry no display hints; serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyMetadata {}

// ---------------------------------------------------------------------------
// Item shapes
// ---------------------------------------------------------------------------

/// A product entry inside a best-seller block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestSellerProduct {
    pub p_code: String,
    /// 1-based display order within the block.
    pub position: i64,
    pub metadata: ProductMetadata,
    pub redirect_url: String,
}

/// A product entry inside a top-seller block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSellerProduct {
    pub p_code: String,
    pub position: i64,
    pub metadata: ProductMetadata,
    pub redirect_url: String,
}

/// A product attached to an advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisementProduct {
    pub p_code: String,
    pub position: i64,
    pub redirect_url: String,
    pub metadata: EmptyMetadata,
}

/// A subcategory entry inside a popular-category block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularCategoryItem {
    pub sub_category_id: String,
    pub position: i64,
    pub metadata: CategoryMetadata,
    pub redirect_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_code: Option<String>,
}

/// A subcategory entry inside a seasonal-category block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalCategoryItem {
    pub sub_category_id: String,
    pub position: i64,
    pub redirect_url: String,
    pub metadata: EmptyMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_code: Option<String>,
}

/// The typed output of one import, one variant per [`ImportKind`].
///
/// Serializes untagged, i.e. as the bare JSON array of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ImportedItems {
    BestSeller(Vec<BestSellerProduct>),
    TopSeller(Vec<TopSellerProduct>),
    Advertisement(Vec<AdvertisementProduct>),
    PopularCategory(Vec<PopularCategoryItem>),
    SeasonalCategory(Vec<SeasonalCategoryItem>),
}

impl ImportedItems {
    pub fn kind(&self) -> ImportKind {
        match self {
            ImportedItems::BestSeller(_) => ImportKind::BestSeller,
            ImportedItems::TopSeller(_) => ImportKind::TopSeller,
            ImportedItems::Advertisement(_) => ImportKind::Advertisement,
            ImportedItems::PopularCategory(_) => ImportKind::PopularCategory,
            ImportedItems::SeasonalCategory(_) => ImportKind::SeasonalCategory,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ImportedItems::BestSeller(items) => items.len(),
            ImportedItems::TopSeller(items) => items.len(),
            ImportedItems::Advertisement(items) => items.len(),
            ImportedItems::PopularCategory(items) => items.len(),
            ImportedItems::SeasonalCategory(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
