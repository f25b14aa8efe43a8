// src/process/mod.rs
//! Grid → records: header resolution and row normalization.

pub mod headers;
pub mod normalize;
pub mod raw_table;
pub mod record;

pub use headers::{column_label, resolve_headers};
pub use normalize::{is_blank_row, normalize_row};
pub use raw_table::RawTable;
pub use record::Record;
