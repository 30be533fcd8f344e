//! Settings for the permsync tool.
//!
//! A single JSON settings file supplies the Frontegg API base URL and the
//! vendor credential for each named environment:
//!
//! ```json
//! {
//!   "baseUrl": "https://api.frontegg.com",
//!   "environments": {
//!     "dev": { "clientId": "...", "secret": "..." },
//!     "qa":  { "clientId": "...", "secret": "..." }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Credential;

/// Default Frontegg API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.frontegg.com";

/// Complete permsync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Frontegg API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Vendor credentials keyed by environment name (e.g. "dev", "qa").
    #[serde(default)]
    pub environments: HashMap<String, Credential>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            environments: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut settings: Self = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Default settings path under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("permsync").join("settings.json"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PERMSYNC_BASE_URL") {
            self.base_url = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_settings_point_at_frontegg() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://api.frontegg.com");
        assert!(settings.environments.is_empty());
    }

    #[test]
    fn load_parses_environments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "environments": {{
                    "dev": {{ "clientId": "dev-client", "secret": "dev-secret" }},
                    "qa":  {{ "clientId": "qa-client", "secret": "qa-secret" }}
                }}
            }}"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.environments.len(), 2);
        assert_eq!(settings.environments["dev"].client_id, "dev-client");
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = Settings::load(Path::new("/nonexistent/permsync.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("/nonexistent/permsync.json"));
    }

    #[test]
    fn load_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
