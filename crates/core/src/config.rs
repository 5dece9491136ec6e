//! Pagination configuration via `hitview.toml`
//!
//! Controls the page-number window rendered by `iter_pages` and the page
//! size used when a query does not set one.

use crate::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "hitview.toml";

fn default_left_edge() -> u32 {
    2
}

fn default_left_current() -> u32 {
    2
}

fn default_right_current() -> u32 {
    5
}

fn default_right_edge() -> u32 {
    2
}

fn default_page_size() -> u32 {
    20
}

/// Pagination settings
///
/// # Example
///
/// ```toml
/// # Pages always shown at the start and end of the list
/// left_edge = 2
/// right_edge = 2
///
/// # Pages shown around the current page
/// left_current = 2
/// right_current = 5
///
/// default_page_size = 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Pages always shown at the start
    #[serde(default = "default_left_edge")]
    pub left_edge: u32,
    /// Pages shown before the current page
    #[serde(default = "default_left_current")]
    pub left_current: u32,
    /// Pages shown from the current page onward
    #[serde(default = "default_right_current")]
    pub right_current: u32,
    /// Pages always shown at the end
    #[serde(default = "default_right_edge")]
    pub right_edge: u32,
    /// Page size for queries built without one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            left_edge: default_left_edge(),
            left_current: default_left_current(),
            right_current: default_right_current(),
            right_edge: default_right_edge(),
            default_page_size: default_page_size(),
        }
    }
}

impl PaginationConfig {
    /// Returns the default config file content with comments
    pub fn default_toml() -> &'static str {
        r#"# hitview pagination configuration
#
# Pages always listed at the start and end of the page list
left_edge = 2
right_edge = 2

# Pages listed around the current page
left_current = 2
right_current = 5

# Page size used when a query does not set one
default_page_size = 20
"#
    }

    /// Parse config from a TOML string
    ///
    /// # Errors
    ///
    /// Returns a Config error if the content cannot be parsed or is invalid.
    pub fn from_toml_str(content: &str) -> SearchResult<Self> {
        let config: PaginationConfig = toml::from_str(content)
            .map_err(|e| SearchError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path
    ///
    /// # Errors
    ///
    /// Returns a Config error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> SearchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            SearchError::Config(msg) => {
                SearchError::config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> SearchResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                SearchError::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Reject settings that cannot produce sensible pagination
    pub fn validate(&self) -> SearchResult<()> {
        if self.default_page_size == 0 {
            return Err(SearchError::config("default_page_size must be positive"));
        }
        Ok(())
    }
}
