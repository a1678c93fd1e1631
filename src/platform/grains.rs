//! Node facts ("grains") consulted for the installation path.
//!
//! Grains are an explicit key/value store handed to [`crate::platform::Platform`]
//! at construction. They can be loaded from a JSON or YAML file and then
//! overridden key by key (environment / CLI flags).

use std::collections::HashMap;
use std::path::Path;

use crate::error::{PlatformError, Result};

/// Grain holding the Mattermost installation directory.
pub const INSTALL_PATH_GRAIN: &str = "mattermost_path";

/// Environment variable overriding [`INSTALL_PATH_GRAIN`].
pub const INSTALL_PATH_ENV: &str = "MATTERMOST_PATH";

#[derive(Debug, Clone, Default)]
pub struct Grains {
    values: HashMap<String, String>,
}

impl Grains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grains holding only the installation path.
    pub fn with_install_path(path: impl Into<String>) -> Self {
        let mut grains = Self::new();
        grains.set(INSTALL_PATH_GRAIN, path);
        grains
    }

    /// Load grains from a JSON or YAML file (chosen by extension; JSON otherwise).
    /// The root must be an object. Non-string values are stringified.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PlatformError::Configuration(format!(
                "failed to read grains file {}: {e}",
                path.display()
            ))
        })?;
        let lower = path.to_string_lossy().to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::from_yaml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            PlatformError::Configuration(format!("failed to parse JSON grains: {e}"))
        })?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|e| {
            PlatformError::Configuration(format!("failed to parse YAML grains: {e}"))
        })?;
        let value = serde_json::to_value(yaml).map_err(|e| {
            PlatformError::Configuration(format!("failed to convert YAML grains: {e}"))
        })?;
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(obj) = value else {
            return Err(PlatformError::Configuration(
                "grains root must be an object".into(),
            ));
        };
        let mut grains = Self::new();
        for (k, v) in obj {
            let s = match v {
                serde_json::Value::String(sv) => sv,
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            grains.values.insert(k, s);
        }
        Ok(grains)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a grain that must be present and non-empty.
    pub fn require(&self, key: &str) -> Result<&str> {
        match self.get(key) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(PlatformError::Configuration(format!(
                "grain '{key}' is not set"
            ))),
        }
    }
}
