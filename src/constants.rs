//! Constants used throughout the crate
//!
//! This module centralizes paging defaults, sort defaults and other constant
//! values shared by the repository and service layers.

// Paging
pub const DEFAULT_PAGE_NUMBER: i64 = 1;
/// Page size used when the caller does not supply one at all.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Page size used when the caller supplies a value that is zero or negative.
pub const FALLBACK_PAGE_SIZE: i64 = 5;

// Sorting
pub const DEFAULT_SORT_COLUMN: &str = "Name";
pub const DEFAULT_SORT_DIRECTION: &str = "ASC";

// Keys
pub const CONVENTIONAL_KEY_FIELD: &str = "Id";

// Search
pub const KEYWORD_SEPARATOR: &str = ",";

// Configuration
pub const CONFIG_FILE_NAME: &str = "recordbase.toml";
pub const CONFIG_DIR_NAME: &str = "recordbase";
pub const CONFIG_GENERATED: &str = "Configuration file generated";
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_LOG_FILE_NAME: &str = "recordbase.log";
