//! Rows → header-keyed records.

use merchimport_shared::{HeaderKeyedRecord, Row};

/// Treat the first row as headers and key every following row by them.
///
/// Returns nothing when there is no data row. Short rows map their missing
/// trailing columns to `""`; extra cells beyond the header row are ignored.
pub fn rows_to_records(rows: &[Row]) -> Vec<HeaderKeyedRecord> {
    let Some((headers, data)) = rows.split_first() else {
        return Vec::new();
    };

    data.iter()
        .map(|row| {
            let mut record = HeaderKeyedRecord::new();
            for (i, header) in headers.iter().enumerate() {
                let value = row.get(i).map(|v| v.trim()).unwrap_or_default();
                record.insert(header.as_str(), value);
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn fewer_than_two_rows_is_empty() {
        assert!(rows_to_records(&[]).is_empty());
        assert!(rows_to_records(&[row(&["p_code", "position"])]).is_empty());
    }

    #[test]
    fn headers_are_verbatim() {
        let records = rows_to_records(&[row(&["P_Code", "position"]), row(&["A", "1"])]);
        assert_eq!(records[0].get("P_Code"), Some("A"));
        assert_eq!(records[0].get("p_code"), None);
    }

    #[test]
    fn short_rows_pad_with_empty_strings() {
        let records = rows_to_records(&[
            row(&["p_code", "position", "badge"]),
            row(&["A"]),
        ]);
        assert_eq!(records[0].get("position"), Some(""));
        assert_eq!(records[0].get("badge"), Some(""));
        assert_eq!(records[0].len(), 3);
    }

    #[test]
    fn output_follows_row_order() {
        let records = rows_to_records(&[
            row(&["p_code"]),
            row(&["first"]),
            row(&["second"]),
            row(&["third", "extra"]),
        ]);
        let codes: Vec<&str> = records.iter().filter_map(|r| r.get("p_code")).collect();
        assert_eq!(codes, vec!["first", "second", "third"]);
        assert_eq!(records[2].len(), 1);
    }
}
