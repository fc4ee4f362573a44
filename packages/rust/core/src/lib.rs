//! CSV ingestion pipeline for merchandising content imports.
//!
//! This crate ties together CSV parsing, header-keyed record building, and
//! per-shape item mapping into end-to-end imports (e.g., `import_file`).

pub mod csv_parser;
pub mod headers;
pub mod mappers;
pub mod pipeline;
pub mod records;
pub mod templates;

pub use csv_parser::{ParseOptions, parse_csv};
pub use headers::{missing_headers, validate_headers};
pub use mappers::{
    DomainMapper, parse_advertisement_products, parse_best_seller_products,
    parse_popular_category_items, parse_seasonal_category_items, parse_top_seller_products,
};
pub use pipeline::{ImportOutcome, import_file, import_str};
pub use records::rows_to_records;
