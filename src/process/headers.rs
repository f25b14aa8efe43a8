use super::raw_table::RawTable;
use crate::fetch::RawGrid;

/// Spreadsheet-style label for a 0-based column index: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Split a grid into headers and data rows.
///
/// Returns `None` for an empty grid. With `has_headers` the first row is taken
/// verbatim (no trimming or dedupe); otherwise labels are generated for the
/// widest row and every row is data.
pub fn resolve_headers(grid: RawGrid, has_headers: bool) -> Option<RawTable> {
    if grid.is_empty() {
        return None;
    }

    if has_headers {
        let mut rows = grid.into_iter();
        let headers = rows.next().unwrap_or_default();
        return Some(RawTable {
            headers,
            rows: rows.collect(),
        });
    }

    let max_columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    Some(RawTable {
        headers: (0..max_columns).map(column_label).collect(),
        rows: grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> RawGrid {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn labels_follow_column_letters() {
        let first: Vec<String> = (0..3).map(column_label).collect();
        assert_eq!(first, vec!["A", "B", "C"]);
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(701), "ZZ");
    }

    #[test]
    fn first_row_becomes_headers_verbatim() {
        let g = grid(&[&[" Name", "Name", ""], &["a"], &["b", "c"]]);
        let table = resolve_headers(g.clone(), true).unwrap();
        assert_eq!(table.headers, g[0]);
        assert_eq!(table.rows.len(), g.len() - 1);
        assert_eq!(table.rows[1], vec!["b", "c"]);
    }

    #[test]
    fn header_only_grid_has_no_rows() {
        let table = resolve_headers(grid(&[&["Name", "Price"]]), true).unwrap();
        assert_eq!(table.headers, vec!["Name", "Price"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn synthesized_headers_span_widest_row() {
        let g = grid(&[&["a"], &["b", "c", "d"], &[]]);
        let table = resolve_headers(g.clone(), false).unwrap();
        assert_eq!(table.headers, vec!["A", "B", "C"]);
        assert_eq!(table.rows, g);
    }

    #[test]
    fn empty_grid_resolves_to_nothing() {
        assert_eq!(resolve_headers(Vec::new(), true), None);
        assert_eq!(resolve_headers(Vec::new(), false), None);
    }
}
