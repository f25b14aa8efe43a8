// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// Target type of a column after coercion.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Date,
}

/// A single declared field, as written in the project config.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: FieldKind,
    /// Used when the column is absent, or for a blank non-string cell; coerced like a cell value.
    #[serde(default)]
    pub default: Option<String>,
    /// Missing values become `null` instead of failing.
    #[serde(default)]
    pub optional: bool,
}

fn default_kind() -> FieldKind {
    FieldKind::String
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            optional: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
