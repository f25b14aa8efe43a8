pub mod config;
pub mod digest;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod process;
pub mod schema;
pub mod store;

pub use error::{ConfigError, DigestError, FetchError, LoadError, ValidationError};
pub use loader::{LoadSummary, SheetLoader};
