//! CLI configuration.
//!
//! Settings come from a TOML file (`staydesk.toml` next to the working
//! directory, or `--config <PATH>`). Credential acquisition is out of scope:
//! the file carries a pre-obtained bearer token, either inline or via the
//! name of an environment variable.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "staydesk.toml";

fn default_worksheet() -> String {
    "시트1".to_string()
}

fn default_token_env() -> String {
    "STAYDESK_ACCESS_TOKEN".to_string()
}

/// Settings for the two hosted services.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Spreadsheet id from the sheet URL.
    pub spreadsheet_id: String,
    /// Worksheet (tab) title holding the reservations.
    #[serde(default = "default_worksheet")]
    pub worksheet: String,
    /// Numeric gid of the worksheet, used for row deletion.
    #[serde(default)]
    pub sheet_gid: i64,
    /// Calendar to mirror reservations onto; calendar sync is disabled when
    /// unset.
    #[serde(default)]
    pub calendar_id: Option<String>,
    /// Bearer token for both services.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Environment variable consulted when `access_token` is unset.
    #[serde(default = "default_token_env")]
    pub access_token_env: String,
}

impl Settings {
    /// Loads settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read configuration file {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("parse configuration file {}", path.display()))?;
        Ok(settings)
    }

    /// The bearer token, from the file or the configured environment
    /// variable.
    pub fn token(&self) -> Result<String> {
        if let Some(token) = &self.access_token {
            return Ok(token.clone());
        }
        match env::var(&self.access_token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => bail!(
                "no access token: set `access_token` in the configuration file \
                 or export {}",
                self.access_token_env
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_fills_defaults() {
        let settings: Settings = toml::from_str(r#"spreadsheet_id = "abc123""#).unwrap();
        assert_eq!(settings.spreadsheet_id, "abc123");
        assert_eq!(settings.worksheet, "시트1");
        assert_eq!(settings.sheet_gid, 0);
        assert_eq!(settings.calendar_id, None);
        assert_eq!(settings.access_token_env, "STAYDESK_ACCESS_TOKEN");
    }

    #[test]
    fn inline_token_wins() {
        let settings: Settings = toml::from_str(
            r#"
            spreadsheet_id = "abc123"
            access_token = "ya29.token"
            "#,
        )
        .unwrap();
        assert_eq!(settings.token().unwrap(), "ya29.token");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = toml::from_str::<Settings>(
            r#"
            spreadsheet_id = "abc123"
            spreadsheet_url = "https://example.invalid"
            "#,
        );
        assert!(parsed.is_err());
    }
}
