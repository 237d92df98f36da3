// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::country::CountryCode;
use crate::error::PreferencesError;

const PREFERENCES_DIRNAME: &str = "podscout";
const PREFERENCES_FILENAME: &str = "discovery.json";

/// Persisted discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryPreferences {
    #[serde(default)]
    pub country_code: CountryCode,
    /// Discovery switched off by the user
    #[serde(default)]
    pub hidden: bool,
    /// The user has not yet agreed to contact the catalog
    #[serde(default = "default_needs_confirm")]
    pub needs_confirm: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_needs_confirm() -> bool {
    true
}

impl Default for DiscoveryPreferences {
    fn default() -> Self {
        Self {
            country_code: CountryCode::Unset,
            hidden: false,
            needs_confirm: default_needs_confirm(),
            updated_at: None,
        }
    }
}

impl DiscoveryPreferences {
    /// Pick a country; choosing one also makes discovery visible again
    pub fn select_country(&mut self, country: CountryCode) {
        self.country_code = country;
        self.hidden = false;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Record that the user agreed to load suggestions from the catalog
    pub fn confirm(&mut self) {
        self.needs_confirm = false;
    }
}

/// Default location of the preferences file (`<config dir>/podscout/discovery.json`)
pub fn default_preferences_path() -> Result<PathBuf, PreferencesError> {
    dirs::config_dir()
        .map(|dir| dir.join(PREFERENCES_DIRNAME).join(PREFERENCES_FILENAME))
        .ok_or(PreferencesError::NoConfigDirectory)
}

/// Read preferences, returning defaults if the file does not exist yet
pub fn read_preferences(path: &Path) -> Result<DiscoveryPreferences, PreferencesError> {
    if !path.exists() {
        return Ok(DiscoveryPreferences::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| PreferencesError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| PreferencesError::JsonParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write preferences, creating the parent directory if needed
pub fn write_preferences(
    path: &Path,
    preferences: &DiscoveryPreferences,
) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PreferencesError::CreateDirectoryFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let stamped = DiscoveryPreferences {
        updated_at: Some(Utc::now().to_rfc3339()),
        ..preferences.clone()
    };

    let json = serde_json::to_string_pretty(&stamped)?;
    std::fs::write(path, json).map_err(|e| PreferencesError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn defaults_require_confirmation_with_unset_country() {
        let prefs = DiscoveryPreferences::default();
        assert_eq!(prefs.country_code, CountryCode::Unset);
        assert!(!prefs.hidden);
        assert!(prefs.needs_confirm);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let prefs = read_preferences(&dir.path().join("discovery.json")).unwrap();
        assert_eq!(prefs, DiscoveryPreferences::default());
    }

    #[test]
    fn write_and_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("discovery.json");

        let mut prefs = DiscoveryPreferences::default();
        prefs.select_country("se".parse().unwrap());
        prefs.confirm();
        write_preferences(&path, &prefs).unwrap();

        let read_back = read_preferences(&path).unwrap();
        assert_eq!(read_back.country_code, CountryCode::Region("SE".to_string()));
        assert!(!read_back.needs_confirm);
        assert!(read_back.updated_at.is_some());
    }

    #[test]
    fn selecting_country_unhides_discovery() {
        let mut prefs = DiscoveryPreferences::default();
        prefs.set_hidden(true);
        prefs.select_country("NL".parse().unwrap());
        assert!(!prefs.hidden);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("discovery.json");
        std::fs::write(&path, r#"{"hidden": true}"#).unwrap();

        let prefs = read_preferences(&path).unwrap();
        assert!(prefs.hidden);
        assert!(prefs.needs_confirm);
        assert_eq!(prefs.country_code, CountryCode::Unset);
    }

    #[test]
    fn invalid_country_in_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("discovery.json");
        std::fs::write(&path, r#"{"country_code": "Atlantis"}"#).unwrap();

        let result = read_preferences(&path);
        assert!(matches!(result, Err(PreferencesError::JsonParseFailed { .. })));
    }
}
