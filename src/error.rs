use reqwest::StatusCode;

/// Failure retrieving the cell grid. Aborts the whole load.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("sheet id must not be empty")]
    MissingSheetId,

    #[error("invalid request url for sheet {sheet_id}: {reason}")]
    InvalidUrl { sheet_id: String, reason: String },

    #[error("request for sheet {sheet_id} failed")]
    Transport {
        sheet_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch sheet {sheet_id}: {status} {reason}")]
    Status {
        sheet_id: String,
        status: StatusCode,
        reason: String,
    },

    #[error("malformed response body for sheet {sheet_id}")]
    Decode {
        sheet_id: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A row rejected by the schema.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{id}: {}{message}", field_prefix(.field))]
pub struct ValidationError {
    pub id: String,
    pub field: Option<String>,
    pub message: String,
}

fn field_prefix(field: &Option<String>) -> String {
    field
        .as_deref()
        .map(|f| format!("field `{}` ", f))
        .unwrap_or_default()
}

impl ValidationError {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field: None,
            message: message.into(),
        }
    }

    pub fn field(id: impl Into<String>, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("could not serialize data for digest")]
pub struct DigestError(#[from] pub serde_json::Error);

/// Everything that can end a load cycle early.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("digest failed for {id}")]
    Digest {
        id: String,
        #[source]
        source: DigestError,
    },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("collection `{0}` has an empty sheet_id")]
    EmptySheetId(String),

    #[error("collection `{0}` needs either api_key or api_key_env")]
    MissingApiKey(String),

    #[error("collection `{collection}`: environment variable {var} is not set")]
    UnsetApiKeyVar { collection: String, var: String },

    #[error("collection name `{0}` is used more than once")]
    DuplicateCollection(String),

    #[error("collection name `{0}` must be non-empty and free of `/`, `\\` and `..`")]
    InvalidCollectionName(String),
}
