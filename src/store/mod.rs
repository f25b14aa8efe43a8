// src/store/mod.rs

pub mod file;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stored row: stable id, validated data, change-detection digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub id: String,
    pub data: T,
    pub digest: String,
}

/// Keyed collection the loader writes into. Consumers own the implementation.
pub trait Store<T> {
    /// Drop every entry of this collection.
    fn clear(&mut self);
    /// Insert, or replace the entry with the same id.
    fn set(&mut self, entry: Entry<T>);
}

/// In-memory store keeping entries in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    entries: Vec<Entry<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Entry<T>> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// id → digest, for comparing against an earlier load.
    pub fn digests(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.id.clone(), e.digest.clone()))
            .collect()
    }

    pub fn into_entries(self) -> Vec<Entry<T>> {
        self.entries
    }
}

impl<T> Store<T> for MemoryStore<T> {
    fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn set(&mut self, entry: Entry<T>) {
        match self.index.get(&entry.id) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }
}
