use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as _, Sha256};

use crate::error::DigestError;

/// Change-detection token for validated data. Must be a pure function of `data`.
pub trait Digester<T> {
    fn digest(&self, data: &T) -> Result<String, DigestError>;
}

impl<T, F> Digester<T> for F
where
    F: Fn(&T) -> String,
{
    fn digest(&self, data: &T) -> Result<String, DigestError> {
        Ok(self(data))
    }
}

/// `sha256:<hex>` over the canonical JSON form of the data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digester;

impl<T: Serialize> Digester<T> for Sha256Digester {
    fn digest(&self, data: &T) -> Result<String, DigestError> {
        let value = serde_json::to_value(data)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical_json(&value).as_bytes());
        Ok(format!("sha256:{:x}", hasher.finalize()))
    }
}

/// JSON text with object keys sorted at every level.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let entries: Vec<String> = keys
                .iter()
                .map(|k| format!("{}:{}", Value::String((*k).clone()), canonical_json(&map[*k])))
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", entries.join(","))
        }
        other => other.to_string(),
    }
}
