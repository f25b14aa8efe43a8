// src/fetch/mod.rs

pub mod sheets;

pub use sheets::{GridSource, RawGrid, SheetsClient, SHEETS_API_BASE};
