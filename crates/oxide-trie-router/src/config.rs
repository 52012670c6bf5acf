//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What happens when a path that already has an action is registered again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`RouterError::DuplicateRegistration`](crate::RouterError::DuplicateRegistration).
    #[default]
    Reject,
    /// Last registration wins. Its middleware is appended after the
    /// middleware of earlier registrations, which keeps running.
    Replace,
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Character separating path segments.
    pub separator: char,
    /// Duplicate registration policy.
    pub on_duplicate: DuplicatePolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            separator: '/',
            on_duplicate: DuplicatePolicy::Reject,
        }
    }
}

impl RouterConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the segment separator.
    #[must_use]
    pub const fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the duplicate registration policy.
    #[must_use]
    pub const fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_trie_router::{DuplicatePolicy, RouterConfig};
    ///
    /// let config = RouterConfig::from_json(r#"{"on_duplicate": "replace"}"#).unwrap();
    /// assert_eq!(config.separator, '/');
    /// assert_eq!(config.on_duplicate, DuplicatePolicy::Replace);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
