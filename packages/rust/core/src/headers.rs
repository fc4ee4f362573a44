//! Header-row checks.
//!
//! Comparison is case-insensitive and ignores surrounding whitespace, unlike
//! record mapping which uses headers verbatim.

use merchimport_shared::ImportKind;

use crate::csv_parser::{ParseOptions, parse_csv};

/// Required headers absent from `headers`, in the order they were asked for.
pub fn missing_headers(headers: &[String], required: &[&str]) -> Vec<String> {
    let present: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
    required
        .iter()
        .filter(|r| !present.contains(&normalize(r)))
        .map(|r| r.to_string())
        .collect()
}

/// Headers in `headers` that the mapper for `kind` never reads.
pub fn unrecognized_headers(headers: &[String], kind: ImportKind) -> Vec<String> {
    let known: Vec<String> = kind.recognized_headers().iter().map(|h| normalize(h)).collect();
    headers
        .iter()
        .filter(|h| !known.contains(&normalize(h)))
        .cloned()
        .collect()
}

/// Whether the first row of `content` carries every required header.
///
/// Input with no rows at all never validates.
pub fn validate_headers(content: &str, required: &[&str]) -> bool {
    let rows = parse_csv(content, &ParseOptions::default());
    match rows.first() {
        Some(headers) => missing_headers(headers, required).is_empty(),
        None => false,
    }
}

fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn validation_is_case_insensitive() {
        assert!(validate_headers("P_CODE,Position\nA,1\n", &["p_code"]));
        assert!(validate_headers("p_code\n", &["P_Code"]));
    }

    #[test]
    fn empty_input_never_validates() {
        assert!(!validate_headers("", &["p_code"]));
        assert!(!validate_headers("\n  \n", &[]));
    }

    #[test]
    fn missing_headers_are_reported_in_order() {
        let missing = missing_headers(
            &headers(&["position", "badge"]),
            &["p_code", "position", "redirect_url"],
        );
        assert_eq!(missing, vec!["p_code", "redirect_url"]);
    }

    #[test]
    fn unrecognized_headers_flag_typos() {
        let extra = unrecognized_headers(
            &headers(&["p_code", "postion", "Badge", "notes"]),
            ImportKind::BestSeller,
        );
        assert_eq!(extra, vec!["postion", "notes"]);
    }

    #[test]
    fn advertisement_does_not_read_badges() {
        let extra = unrecognized_headers(&headers(&["p_code", "badge"]), ImportKind::Advertisement);
        assert_eq!(extra, vec!["badge"]);
    }
}
