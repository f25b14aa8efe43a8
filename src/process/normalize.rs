use super::record::Record;

/// A row with no cells, or only empty/whitespace cells.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Map `row` onto `headers`, or `None` if the row is blank.
///
/// Every header is present in the result; short rows leave `""` in the
/// missing positions and cells beyond the last header are dropped. Values are
/// copied verbatim.
pub fn normalize_row(row: &[String], headers: &[String]) -> Option<Record> {
    if is_blank_row(row) {
        return None;
    }

    let mut record = Record::with_capacity(headers.len());
    for header in headers {
        record.insert(header.as_str(), "");
    }
    for (header, value) in headers.iter().zip(row) {
        record.insert(header.as_str(), value.as_str());
    }
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn blank_rows_are_skipped() {
        let headers = strings(&["Name", "Price"]);
        assert_eq!(normalize_row(&[], &headers), None);
        assert_eq!(normalize_row(&strings(&["", "  "]), &headers), None);
        assert_eq!(normalize_row(&strings(&["\t", "\n"]), &headers), None);
    }

    #[test]
    fn short_rows_default_to_empty() {
        let headers = strings(&["Name", "Price", "Stock"]);
        let r = normalize_row(&strings(&["Widget"]), &headers).unwrap();
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["Name", "Price", "Stock"]);
        assert_eq!(r.get("Name"), Some("Widget"));
        assert_eq!(r.get("Price"), Some(""));
        assert_eq!(r.get("Stock"), Some(""));
    }

    #[test]
    fn long_rows_are_truncated() {
        let headers = strings(&["Name"]);
        let r = normalize_row(&strings(&["Widget", "extra", "more"]), &headers).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("Name"), Some("Widget"));
    }

    #[test]
    fn values_are_copied_verbatim() {
        let headers = strings(&["Name", "Price"]);
        let r = normalize_row(&strings(&["  Widget ", "010"]), &headers).unwrap();
        assert_eq!(r.get("Name"), Some("  Widget "));
        assert_eq!(r.get("Price"), Some("010"));
    }

    #[test]
    fn duplicate_headers_keep_the_later_value() {
        let headers = strings(&["x", "x"]);
        let r = normalize_row(&strings(&["first", "second"]), &headers).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("x"), Some("second"));
    }

    #[test]
    fn row_with_no_headers_still_counts_when_not_blank() {
        let r = normalize_row(&strings(&["orphan"]), &[]).unwrap();
        assert!(r.is_empty());
    }
}
