/// A grid after header resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column labels: the first grid row, or synthesized `A`, `B`, `C`, ...
    pub headers: Vec<String>,
    /// Data rows, header row removed. Ragged; position here decides the entry id.
    pub rows: Vec<Vec<String>>,
}
