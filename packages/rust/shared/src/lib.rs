//! Shared types, error model, and configuration for merchimport.
//!
//! This crate is the foundation depended on by all other merchimport crates.
//! It provides:
//! - [`MerchImportError`] — the unified error type
//! - Domain types ([`ImportKind`], [`HeaderKeyedRecord`], the five item shapes)
//! - Configuration ([`AppConfig`], [`ImportConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ImportConfig, ParserConfig, TemplatesConfig, UploadConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{MerchImportError, Result};
pub use types::{
    AdvertisementProduct, BestSellerProduct, CategoryMetadata, EmptyMetadata, HeaderKeyedRecord,
    ImportKind, ImportedItems, PopularCategoryItem, ProductMetadata, Row, SeasonalCategoryItem,
    TopSellerProduct,
};
