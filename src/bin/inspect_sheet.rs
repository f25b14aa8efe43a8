//! inspect_sheet: fetch one sheet and print what the loader would see.
//!
//! Usage: `inspect_sheet <SHEET_ID> [SHEET_NAME] [--no-headers]`, with the key in `GOOGLE_SHEETS_API_KEY`.

use anyhow::{Context, Result};
use reqwest::Client;
use sheetloader::{
    config::SheetOptions,
    fetch::SheetsClient,
    loader::row_id,
    process::{is_blank_row, normalize_row, resolve_headers},
};
use std::{env, process::exit};

const PREVIEW_ROWS: usize = 5;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <SHEET_ID> [SHEET_NAME] [--no-headers]", args[0]);
        exit(1);
    }
    if let Err(e) = inspect(&args[1..]).await {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

async fn inspect(args: &[String]) -> Result<()> {
    let api_key = env::var("GOOGLE_SHEETS_API_KEY").context("GOOGLE_SHEETS_API_KEY is not set")?;
    let has_headers = !args.iter().any(|a| a == "--no-headers");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));

    let sheet_id = positional.next().context("missing SHEET_ID")?;
    let mut options = SheetOptions::new(sheet_id.as_str(), api_key).with_headers(has_headers);
    if let Some(name) = positional.next() {
        options = options.with_sheet_name(name.as_str());
    }

    let grid = SheetsClient::new(Client::new()).fetch_values(&options).await?;

    println!("=== Sheet: {} ({}) ===", options.sheet_id, options.range());
    println!("Grid rows:            {}", grid.len());
    println!(
        "Widest row:           {}",
        grid.iter().map(Vec::len).max().unwrap_or(0)
    );

    let Some(table) = resolve_headers(grid, options.has_headers) else {
        println!("(no data)");
        return Ok(());
    };

    let blank = table.rows.iter().filter(|r| is_blank_row(r)).count();
    println!("Data rows:            {}", table.rows.len());
    println!("Blank rows (skipped): {}", blank);
    println!();

    println!("=== Headers ===");
    for (i, h) in table.headers.iter().enumerate() {
        println!("- {:>3} | {:?}", i, h);
    }
    println!();

    println!("=== First {} records ===", PREVIEW_ROWS);
    let preview = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| normalize_row(row, &table.headers).map(|r| (i, r)))
        .take(PREVIEW_ROWS);
    for (i, record) in preview {
        println!("{}: {}", row_id(i), serde_json::to_string(&record)?);
    }

    Ok(())
}
