use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use sheetloader::{
    config::{ProjectConfig, SheetOptions},
    digest::Sha256Digester,
    fetch::SheetsClient,
    schema::{FieldSchema, Passthrough, Schema},
    store::{
        file::{collection_path, previous_digests, write_collection, DigestDiff},
        MemoryStore,
    },
    SheetLoader,
};
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Load one collection and write its file next to the others.
async fn run_collection<S>(
    client: &SheetsClient,
    name: &str,
    options: SheetOptions,
    schema: S,
    out_dir: &Path,
) -> Result<()>
where
    S: Schema,
    S::Output: Serialize,
{
    let start = Instant::now();
    let loader = SheetLoader::new(options);
    let mut store = MemoryStore::new();

    let summary = loader
        .load(client, &schema, &Sha256Digester, &mut store)
        .await
        .with_context(|| format!("loading collection {}", name))?;

    let path = collection_path(out_dir, name);
    let previous = previous_digests(&path);
    let diff = DigestDiff::compute(&previous, &store.digests());
    write_collection(out_dir, name, store.entries())?;

    info!(
        collection = name,
        rows = summary.rows,
        stored = summary.stored,
        skipped = summary.skipped,
        added = diff.added,
        changed = diff.changed,
        unchanged = diff.unchanged,
        removed = diff.removed,
        elapsed = ?start.elapsed(),
        "wrote {}",
        path.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    // ─── 2) read config, resolve credentials ─────────────────────────
    let mut args = env::args().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sheets.yaml"));
    let config = ProjectConfig::load(&config_path)?;
    let out_dir = args.next().map(PathBuf::from).unwrap_or(config.output_dir);

    let mut jobs = Vec::with_capacity(config.collections.len());
    for collection in config.collections {
        let options = collection
            .resolve(|var| env::var(var).ok())
            .with_context(|| format!("in {}", config_path.display()))?;
        jobs.push((collection, options));
    }

    if jobs.is_empty() {
        info!("no collections configured; exit");
        return Ok(());
    }
    info!(count = jobs.len(), out_dir = %out_dir.display(), "loading collections");

    // ─── 3) one task per collection, each with its own store ─────────
    let client = SheetsClient::new(Client::new());
    let mut handles = Vec::with_capacity(jobs.len());

    for (collection, options) in jobs {
        let client = client.clone();
        let out_dir = out_dir.clone();

        handles.push(tokio::spawn(async move {
            let name = collection.name;
            let result = match collection.schema {
                Some(fields) => {
                    run_collection(&client, &name, options, FieldSchema::new(fields), &out_dir)
                        .await
                }
                None => run_collection(&client, &name, options, Passthrough, &out_dir).await,
            };
            (name, result)
        }));
    }

    // ─── 4) collect results ──────────────────────────────────────────
    let total = handles.len();
    let mut failed = 0;
    for h in handles {
        let (name, result) = h.await?;
        if let Err(e) = result {
            error!(collection = %name, "{:#}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} collections failed", failed, total);
    }
    info!("all done");
    Ok(())
}
