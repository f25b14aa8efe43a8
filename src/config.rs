// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path, path::PathBuf};

use crate::error::ConfigError;
use crate::schema::FieldSpec;

/// Widest column range requested from the values endpoint.
pub const COLUMN_SPAN: &str = "A:ZZ";

/// Everything the loader needs to know about one sheet.
///
/// Built once at startup and handed to the loader by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOptions {
    pub sheet_id: String,
    pub api_key: String,
    /// Tab name; the first tab is read when absent.
    pub sheet_name: Option<String>,
    /// Numeric tab id. Kept for compatibility, the values endpoint only selects tabs by name.
    pub gid: Option<String>,
    pub has_headers: bool,
}

impl SheetOptions {
    pub fn new(sheet_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            api_key: api_key.into(),
            sheet_name: None,
            gid: None,
            has_headers: true,
        }
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    pub fn with_gid(mut self, gid: impl Into<String>) -> Self {
        self.gid = Some(gid.into());
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// `"{sheet_name}!A:ZZ"`, or `"A:ZZ"` for the first tab.
    pub fn range(&self) -> String {
        match self.sheet_name.as_deref() {
            Some(name) if !name.is_empty() => format!("{}!{}", name, COLUMN_SPAN),
            _ => COLUMN_SPAN.to_string(),
        }
    }

    /// True when a `gid` was supplied but cannot be honoured.
    pub fn gid_ignored(&self) -> bool {
        self.gid.is_some() && self.sheet_name.as_deref().map_or(true, str::is_empty)
    }
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("content")
}

/// One entry of the project config file.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    pub sheet_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Name of the variable holding the key, looked up at resolve time.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub sheet_name: Option<String>,
    #[serde(default)]
    pub gid: Option<String>,
    #[serde(default = "default_true")]
    pub has_headers: bool,
    /// Field specs; the record is passed through untouched when absent.
    #[serde(default)]
    pub schema: Option<Vec<FieldSpec>>,
}

impl CollectionConfig {
    /// Build `SheetOptions`, resolving `api_key_env` through `lookup`.
    pub fn resolve<F>(&self, lookup: F) -> std::result::Result<SheetOptions, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.sheet_id.trim().is_empty() {
            return Err(ConfigError::EmptySheetId(self.name.clone()));
        }

        let api_key = match (&self.api_key, &self.api_key_env) {
            (Some(key), _) if !key.is_empty() => key.clone(),
            (_, Some(var)) => lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::UnsetApiKeyVar {
                    collection: self.name.clone(),
                    var: var.clone(),
                })?,
            _ => return Err(ConfigError::MissingApiKey(self.name.clone())),
        };

        Ok(SheetOptions {
            sheet_id: self.sheet_id.clone(),
            api_key,
            sheet_name: self.sheet_name.clone(),
            gid: self.gid.clone(),
            has_headers: self.has_headers,
        })
    }
}

/// Collection names become file names under `output_dir`.
fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}

/// Top-level YAML config: where to write, and which sheets to load.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

impl ProjectConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: ProjectConfig = serde_yaml::from_str(text).context("parsing project config")?;
        cfg.check_names()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }

    fn check_names(&self) -> std::result::Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for c in &self.collections {
            if !is_valid_name(&c.name) {
                return Err(ConfigError::InvalidCollectionName(c.name.clone()));
            }
            if !seen.insert(c.name.as_str()) {
                return Err(ConfigError::DuplicateCollection(c.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
output_dir: site/data
collections:
  - name: products
    sheet_id: abc123
    api_key_env: SHEETS_KEY
    sheet_name: Products
    schema:
      - name: Brand
        type: string
        default: ""
      - name: Price
        type: number
  - name: reviews
    sheet_id: def456
    api_key: inline-key
    has_headers: false
"#;

    #[test]
    fn parses_collections_with_defaults() {
        let cfg = ProjectConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("site/data"));
        assert_eq!(cfg.collections.len(), 2);
        assert!(cfg.collections[0].has_headers);
        assert_eq!(cfg.collections[0].schema.as_ref().unwrap().len(), 2);
        assert!(!cfg.collections[1].has_headers);
        assert!(cfg.collections[1].schema.is_none());
    }

    #[test]
    fn resolve_reads_key_through_lookup() {
        let cfg = ProjectConfig::from_yaml(SAMPLE).unwrap();
        let env: HashMap<&str, &str> = [("SHEETS_KEY", "from-env")].into_iter().collect();
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let products = cfg.collections[0].resolve(lookup).unwrap();
        assert_eq!(products.api_key, "from-env");
        assert_eq!(products.range(), "Products!A:ZZ");

        let reviews = cfg.collections[1].resolve(lookup).unwrap();
        assert_eq!(reviews.api_key, "inline-key");
        assert_eq!(reviews.range(), "A:ZZ");
        assert!(!reviews.has_headers);
    }

    #[test]
    fn resolve_rejects_missing_credentials() {
        let cfg = ProjectConfig::from_yaml(SAMPLE).unwrap();
        let err = cfg.collections[0].resolve(|_| None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsetApiKeyVar {
                collection: "products".into(),
                var: "SHEETS_KEY".into()
            }
        );

        let mut bare = cfg.collections[1].clone();
        bare.api_key = None;
        assert_eq!(
            bare.resolve(|_| None).unwrap_err(),
            ConfigError::MissingApiKey("reviews".into())
        );

        bare.sheet_id = "  ".into();
        assert_eq!(
            bare.resolve(|_| None).unwrap_err(),
            ConfigError::EmptySheetId("reviews".into())
        );
    }

    #[test]
    fn example_config_parses() {
        let cfg = ProjectConfig::from_yaml(include_str!("../sheets.example.yaml")).unwrap();
        let names: Vec<_> = cfg.collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["products", "reviews"]);
        let reviews = cfg.collections[1].schema.as_ref().unwrap();
        assert_eq!(reviews[3].kind, crate::schema::FieldKind::Date);
        assert_eq!(cfg.collections[0].schema.as_ref().unwrap()[5].name, "Price (THB)");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let yaml = r#"
collections:
  - { name: a, sheet_id: x, api_key: k }
  - { name: a, sheet_id: y, api_key: k }
"#;
        assert!(ProjectConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn path_like_names_are_rejected() {
        for name in ["../x", "a/b", "a\\\\b", "..", "\"\""] {
            let yaml = format!(
                "collections:\n  - {{ name: {}, sheet_id: x, api_key: k }}\n",
                name
            );
            let cfg: ProjectConfig = serde_yaml::from_str(&yaml).unwrap();
            assert!(
                matches!(
                    cfg.check_names(),
                    Err(ConfigError::InvalidCollectionName(_))
                ),
                "{name} accepted"
            );
        }
        let dotted = "collections:\n  - { name: my.products, sheet_id: x, api_key: k }\n";
        assert!(ProjectConfig::from_yaml(dotted).is_ok());
    }

    #[test]
    fn gid_without_name_is_flagged() {
        let opts = SheetOptions::new("id", "key").with_gid("12345");
        assert!(opts.gid_ignored());
        assert_eq!(opts.range(), "A:ZZ");

        let opts = opts.with_sheet_name("Sheet1");
        assert!(!opts.gid_ignored());
        assert_eq!(opts.range(), "Sheet1!A:ZZ");
    }
}
