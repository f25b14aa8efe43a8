// src/schema/mod.rs
//! The validation boundary: untyped `Record` in, caller-chosen output type out.

pub mod coerce;
pub mod types;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::marker::PhantomData;

use crate::error::ValidationError;
use crate::process::Record;

pub use types::{FieldKind, FieldSpec};

/// Validates and coerces one normalized record.
pub trait Schema {
    type Output;

    fn parse(&self, id: &str, record: Record) -> Result<Self::Output, ValidationError>;
}

impl<O, F> Schema for F
where
    F: Fn(&str, Record) -> Result<O, ValidationError>,
{
    type Output = O;

    fn parse(&self, id: &str, record: Record) -> Result<O, ValidationError> {
        self(id, record)
    }
}

/// No schema: the record is stored as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Schema for Passthrough {
    type Output = Record;

    fn parse(&self, _id: &str, record: Record) -> Result<Record, ValidationError> {
        Ok(record)
    }
}

/// Object schema described by field specs.
///
/// Only declared fields are emitted, in declaration order. Columns the sheet has
/// but the schema does not are dropped.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// `cell` is `None` when the sheet has no column named after the field.
    fn field_value(
        &self,
        id: &str,
        spec: &FieldSpec,
        cell: Option<&str>,
    ) -> Result<Value, ValidationError> {
        let fail = |message: String| ValidationError::field(id, &spec.name, message);

        match (spec.kind, cell) {
            (FieldKind::String, Some(text)) => return Ok(Value::String(text.to_string())),
            (kind, Some(text)) if !text.trim().is_empty() => {
                return coerce::coerce(kind, text).map_err(fail)
            }
            _ => {}
        }

        // Absent column, or a blank cell under a non-string field.
        if let Some(default) = &spec.default {
            return match spec.kind {
                FieldKind::String => Ok(Value::String(default.clone())),
                kind => coerce::coerce(kind, default).map_err(fail),
            };
        }
        if spec.optional {
            return Ok(Value::Null);
        }
        Err(fail("required".to_string()))
    }
}

impl Schema for FieldSchema {
    type Output = Map<String, Value>;

    fn parse(&self, id: &str, record: Record) -> Result<Self::Output, ValidationError> {
        let mut out = Map::with_capacity(self.fields.len());
        for spec in &self.fields {
            let value = self.field_value(id, spec, record.get(&spec.name))?;
            out.insert(spec.name.clone(), value);
        }
        Ok(out)
    }
}

/// Deserialize the record straight into a caller's struct.
///
/// Fields arrive as strings; the target type does its own conversions via serde.
pub struct SerdeSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeSchema<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Schema for SerdeSchema<T> {
    type Output = T;

    fn parse(&self, id: &str, record: Record) -> Result<T, ValidationError> {
        serde_json::from_value(record.to_json()).map_err(|e| ValidationError::new(id, e.to_string()))
    }
}
