// src/loader.rs
//! One load cycle: fetch → resolve headers → normalize → validate + digest → commit.

use tracing::{debug, error, info, instrument, warn};

use crate::config::SheetOptions;
use crate::digest::Digester;
use crate::error::LoadError;
use crate::fetch::GridSource;
use crate::process::{normalize_row, resolve_headers, RawTable};
use crate::schema::Schema;
use crate::store::{Entry, Store};

/// Outcome of a completed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Data rows seen after the header row, blank ones included.
    pub rows: usize,
    /// Entries committed to the store.
    pub stored: usize,
    /// Blank rows that produced no entry.
    pub skipped: usize,
}

/// Stable id for the data row at 0-based position `index` (header row excluded).
///
/// Blank rows still use up their position, so ids can have gaps.
pub fn row_id(index: usize) -> String {
    format!("row-{}", index + 1)
}

/// Normalize, validate and digest every row of `table` into a buffer.
///
/// Stops at the first row the schema rejects; nothing is returned for the rows before it.
pub fn build_entries<S, D>(
    table: &RawTable,
    schema: &S,
    digester: &D,
) -> Result<Vec<Entry<S::Output>>, LoadError>
where
    S: Schema,
    D: Digester<S::Output>,
{
    let mut entries = Vec::with_capacity(table.rows.len());

    for (index, row) in table.rows.iter().enumerate() {
        let Some(record) = normalize_row(row, &table.headers) else {
            continue;
        };
        let id = row_id(index);

        let first = index == 0;
        if first {
            debug!(%id, record = ?record, "first entry before parsing");
        }

        let data = schema.parse(&id, record)?;
        let digest = digester
            .digest(&data)
            .map_err(|source| LoadError::Digest {
                id: id.clone(),
                source,
            })?;

        if first {
            debug!(%id, %digest, "first entry after parsing");
        }

        entries.push(Entry { id, data, digest });
    }

    Ok(entries)
}

/// Replace the store's contents with `entries`, in order.
pub fn synchronize<T, St>(store: &mut St, entries: Vec<Entry<T>>)
where
    St: Store<T> + ?Sized,
{
    store.clear();
    for entry in entries {
        store.set(entry);
    }
}

/// Loads one sheet into one store.
#[derive(Debug, Clone)]
pub struct SheetLoader {
    options: SheetOptions,
}

impl SheetLoader {
    pub fn new(options: SheetOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// Run a full cycle. The store is only touched once every row has been
    /// built, so a failed or cancelled load leaves it as it was.
    #[instrument(level = "info", skip_all, fields(sheet_id = %self.options.sheet_id))]
    pub async fn load<G, S, D, St>(
        &self,
        source: &G,
        schema: &S,
        digester: &D,
        store: &mut St,
    ) -> Result<LoadSummary, LoadError>
    where
        G: GridSource,
        S: Schema,
        D: Digester<S::Output>,
        St: Store<S::Output> + ?Sized,
    {
        info!(sheet_id = %self.options.sheet_id, "loading data from sheet");
        if self.options.gid_ignored() {
            warn!(
                gid = self.options.gid.as_deref().unwrap_or_default(),
                "gid cannot select a tab on the values endpoint; reading the first tab"
            );
        }

        let result = self.run(source, schema, digester, store).await;
        if let Err(e) = &result {
            error!(error = %e, "error loading sheet");
        }
        result
    }

    async fn run<G, S, D, St>(
        &self,
        source: &G,
        schema: &S,
        digester: &D,
        store: &mut St,
    ) -> Result<LoadSummary, LoadError>
    where
        G: GridSource,
        S: Schema,
        D: Digester<S::Output>,
        St: Store<S::Output> + ?Sized,
    {
        let grid = source.fetch_grid(&self.options).await?;

        let Some(table) = resolve_headers(grid, self.options.has_headers) else {
            warn!("no data found in the sheet");
            return Ok(LoadSummary::default());
        };
        debug!(headers = ?table.headers, rows = table.rows.len(), "resolved headers");

        let entries = build_entries(&table, schema, digester)?;
        let summary = LoadSummary {
            rows: table.rows.len(),
            stored: entries.len(),
            skipped: table.rows.len() - entries.len(),
        };

        synchronize(store, entries);
        info!(
            rows = summary.rows,
            stored = summary.stored,
            skipped = summary.skipped,
            "loaded {} rows from sheet",
            summary.rows
        );
        Ok(summary)
    }
}
