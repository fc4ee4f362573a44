//! Blank CSV templates offered for download next to each import form.

use merchimport_shared::ImportKind;

/// URL path the dashboard serves templates from unless configured otherwise.
pub const DEFAULT_TEMPLATE_BASE: &str = "/templates";

/// File name of the template for `kind`.
pub fn template_name(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::BestSeller => "best-seller-products.csv",
        ImportKind::TopSeller => "top-seller-products.csv",
        ImportKind::Advertisement => "advertisement-products.csv",
        ImportKind::PopularCategory => "popular-category-subcategories.csv",
        ImportKind::SeasonalCategory => "seasonal-category-subcategories.csv",
    }
}

/// Static asset path of the template, e.g. `/templates/best-seller-products.csv`.
pub fn template_path(kind: ImportKind) -> String {
    template_path_in(DEFAULT_TEMPLATE_BASE, kind)
}

/// Like [`template_path`] under a custom base path.
pub fn template_path_in(base: &str, kind: ImportKind) -> String {
    format!("{}/{}", base.trim_end_matches('/'), template_name(kind))
}

/// Template contents: the recognised header row and one sample row.
pub fn template_csv(kind: ImportKind) -> String {
    format!(
        "{}\n{}\n",
        kind.recognized_headers().join(","),
        sample_row(kind).join(",")
    )
}

fn sample_row(kind: ImportKind) -> &'static [&'static str] {
    match kind {
        ImportKind::BestSeller | ImportKind::TopSeller => {
            &["SKU100", "1", "NEW", "Fresh Pick", "true", "/p/SKU100"]
        }
        ImportKind::Advertisement => &["SKU100", "1", "/p/SKU100"],
        ImportKind::PopularCategory => &["SUB100", "1", "TRENDING", "false", "/c/SUB100", "ST01"],
        ImportKind::SeasonalCategory => &["SUB100", "1", "/c/SUB100", "ST01"],
    }
}
