// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CountryError;

/// Persisted value meaning "no country chosen yet"
pub const COUNTRY_CODE_UNSET: &str = "99";

/// Region used when the device region cannot be determined or fails to load
pub const FALLBACK_REGION: &str = "US";

/// Locale environment variables, in lookup priority order
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A toplist region: either explicitly chosen or left to the device default
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CountryCode {
    #[default]
    Unset,
    /// Two uppercase ASCII letters
    Region(String),
}

impl CountryCode {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The region to request, substituting `default_region` when unset
    pub fn resolve<'a>(&'a self, default_region: &'a str) -> &'a str {
        match self {
            Self::Unset => default_region,
            Self::Region(code) => code,
        }
    }
}

impl FromStr for CountryCode {
    type Err = CountryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == COUNTRY_CODE_UNSET {
            return Ok(Self::Unset);
        }
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(Self::Region(trimmed.to_ascii_uppercase()));
        }
        Err(CountryError::Invalid(s.to_string()))
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CountryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str(COUNTRY_CODE_UNSET),
            Self::Region(code) => f.write_str(code),
        }
    }
}

/// Region of the current environment, derived from the locale variables.
///
/// Falls back to [`FALLBACK_REGION`] when no variable carries a region.
pub fn device_default_region() -> String {
    LOCALE_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|locale| region_from_locale(&locale))
        .unwrap_or_else(|| FALLBACK_REGION.to_string())
}

/// Extract the region part of a POSIX locale such as `en_US.UTF-8` or `de_DE@euro`
pub fn region_from_locale(locale: &str) -> Option<String> {
    let without_codeset = locale.split(['.', '@']).next()?;
    let (_, region) = without_codeset.split_once(['_', '-'])?;
    match region.parse::<CountryCode>() {
        Ok(CountryCode::Region(code)) => Some(code),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sentinel_as_unset() {
        assert_eq!("99".parse::<CountryCode>(), Ok(CountryCode::Unset));
    }

    #[test]
    fn parses_and_uppercases_region() {
        assert_eq!(
            "de".parse::<CountryCode>(),
            Ok(CountryCode::Region("DE".to_string()))
        );
        assert_eq!(
            " us ".parse::<CountryCode>(),
            Ok(CountryCode::Region("US".to_string()))
        );
    }

    #[test]
    fn rejects_invalid_codes() {
        for input in ["", "USA", "1A", "u", "9"] {
            assert!(input.parse::<CountryCode>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn display_matches_persisted_form() {
        assert_eq!(CountryCode::Unset.to_string(), "99");
        assert_eq!(CountryCode::Region("GB".to_string()).to_string(), "GB");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&CountryCode::Region("FR".to_string())).unwrap();
        assert_eq!(json, "\"FR\"");
        let back: CountryCode = serde_json::from_str("\"99\"").unwrap();
        assert_eq!(back, CountryCode::Unset);
        assert!(serde_json::from_str::<CountryCode>("\"France\"").is_err());
    }

    #[test]
    fn resolve_substitutes_default_only_when_unset() {
        assert_eq!(CountryCode::Unset.resolve("SE"), "SE");
        assert_eq!(CountryCode::Region("JP".to_string()).resolve("SE"), "JP");
    }

    #[test]
    fn region_from_posix_locales() {
        assert_eq!(region_from_locale("en_US.UTF-8"), Some("US".to_string()));
        assert_eq!(region_from_locale("de_DE@euro"), Some("DE".to_string()));
        assert_eq!(region_from_locale("pt-br"), Some("BR".to_string()));
        assert_eq!(region_from_locale("C"), None);
        assert_eq!(region_from_locale("C.UTF-8"), None);
        assert_eq!(region_from_locale("POSIX"), None);
    }
}
