// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::DEFAULT_EXPENSE_CATEGORIES;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "WealthWise", "wealthwise"));

pub const DEFAULT_QUOTE_URL: &str = "https://finnhub.io/api/v1";
pub const DEFAULT_REFRESH_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quote_url: String,
    pub quote_token: Option<String>,
    pub refresh_secs: u64,
    pub log_level: String,
    pub expense_categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            quote_token: None,
            refresh_secs: DEFAULT_REFRESH_SECS,
            log_level: "warn".to_string(),
            expense_categories: DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl Settings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    /// Applies `WEALTHWISE_*` and `RUST_LOG` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("WEALTHWISE_QUOTE_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.quote_token = Some(token.trim().to_string());
        }
        if let Some(url) = lookup("WEALTHWISE_QUOTE_URL").filter(|u| !u.trim().is_empty()) {
            self.quote_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("WEALTHWISE_REFRESH_SECS") {
            self.refresh_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid WEALTHWISE_REFRESH_SECS '{}'", secs))?;
        }
        if let Some(level) = lookup("RUST_LOG").filter(|l| !l.trim().is_empty()) {
            self.log_level = level;
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Reads settings from `path`; a missing file yields the defaults.
pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("Read settings {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Parse settings {}", path.display()))
}

pub fn load() -> Result<Settings> {
    let mut settings = load_from(&config_path()?)?;
    settings.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let s = load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.refresh_interval(), Duration::from_secs(10));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"refresh_secs": 30, "expense_categories": ["Rent"]}"#).unwrap();
        let s = load_from(&path).unwrap();
        assert_eq!(s.refresh_secs, 30);
        assert_eq!(s.expense_categories, vec!["Rent".to_string()]);
        assert_eq!(s.quote_url, DEFAULT_QUOTE_URL);
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("WEALTHWISE_QUOTE_TOKEN", " abc123 "),
            ("WEALTHWISE_QUOTE_URL", "http://localhost:9000/api/"),
            ("WEALTHWISE_REFRESH_SECS", "5"),
        ]
        .into_iter()
        .collect();
        let mut s = Settings::default();
        s.apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(s.quote_token.as_deref(), Some("abc123"));
        assert_eq!(s.quote_url, "http://localhost:9000/api");
        assert_eq!(s.refresh_secs, 5);
    }

    #[test]
    fn bad_refresh_override_is_an_error() {
        let mut s = Settings::default();
        let err = s
            .apply_overrides(|k| (k == "WEALTHWISE_REFRESH_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("WEALTHWISE_REFRESH_SECS"));
    }
}
