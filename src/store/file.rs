// src/store/file.rs
//! Collection files consumed by the site build, one JSON document per collection.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::warn;

use super::Entry;

#[derive(Debug, Serialize)]
struct CollectionFile<'a, T> {
    collection: &'a str,
    generated_at: DateTime<Utc>,
    entries: &'a [Entry<T>],
}

/// Only the parts of an earlier file needed for change detection.
#[derive(Debug, Deserialize)]
struct PreviousFile {
    #[serde(default)]
    entries: Vec<PreviousEntry>,
}

#[derive(Debug, Deserialize)]
struct PreviousEntry {
    id: String,
    digest: String,
}

pub fn collection_path(dir: &Path, collection: &str) -> PathBuf {
    dir.join(format!("{}.json", collection))
}

/// Write `entries` to `<dir>/<collection>.json`, replacing the old file atomically.
pub fn write_collection<T: Serialize>(
    dir: &Path,
    collection: &str,
    entries: &[Entry<T>],
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = collection_path(dir, collection);

    let doc = CollectionFile {
        collection,
        generated_at: Utc::now(),
        entries,
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &doc)
            .with_context(|| format!("serializing collection {}", collection))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.persist(&path)
        .with_context(|| format!("replacing {}", path.display()))?;
    Ok(path)
}

/// id → digest from an earlier collection file. A missing file is an empty map.
pub fn read_digests(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let prev: PreviousFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(prev
        .entries
        .into_iter()
        .map(|e| (e.id, e.digest))
        .collect())
}

/// Like `read_digests`, but an unreadable file counts as having no entries.
///
/// The file is about to be overwritten, so a bad one only costs the diff.
pub fn previous_digests(path: &Path) -> HashMap<String, String> {
    read_digests(path).unwrap_or_else(|e| {
        warn!(
            path = %path.display(),
            error = %format!("{:#}", e),
            "ignoring unreadable previous file"
        );
        HashMap::new()
    })
}

/// How a fresh load compares with the previous one, by id and digest.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DigestDiff {
    pub added: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub removed: usize,
}

impl DigestDiff {
    pub fn compute(previous: &HashMap<String, String>, current: &HashMap<String, String>) -> Self {
        let mut diff = DigestDiff::default();
        for (id, digest) in current {
            match previous.get(id) {
                None => diff.added += 1,
                Some(old) if old == digest => diff.unchanged += 1,
                Some(_) => diff.changed += 1,
            }
        }
        diff.removed = previous.keys().filter(|id| !current.contains_key(*id)).count();
        diff
    }
}
