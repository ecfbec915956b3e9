//! Client configuration from TOML plus environment overrides.
//!
//! Lookup order (later wins):
//!   1. built-in defaults
//!   2. TOML file at QUIZ_CONFIG_PATH
//!   3. QUIZ_API_BASE_URL, QUIZ_API_TIMEOUT_SECS, QUIZ_PREFS_PATH
//!
//! Example file:
//! ```toml
//! preferences_path = "/home/me/.config/codequiz/prefs.toml"
//!
//! [api]
//! base_url = "https://quiz.example.com/api/quiz"
//! timeout_secs = 20
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8089/api/quiz";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_BASE_URL.into(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct ClientConfig {
  #[serde(default)]
  pub api: ApiConfig,
  /// Where the last-used language/difficulty is remembered. None keeps them in memory only.
  #[serde(default)]
  pub preferences_path: Option<PathBuf>,
}

impl ClientConfig {
  /// Parse a TOML config. A zero timeout is refused, matching the env override rule.
  pub fn from_toml_str(s: &str) -> Result<Self, String> {
    let cfg = toml::from_str::<ClientConfig>(s).map_err(|e| e.to_string())?;
    if cfg.api.timeout_secs == 0 {
      return Err("api.timeout_secs must be greater than zero".into());
    }
    Ok(cfg)
  }

  /// Apply env overrides. Values that fail to parse are ignored with a warning.
  pub fn apply_env_overrides(&mut self) {
    if let Ok(url) = std::env::var("QUIZ_API_BASE_URL") {
      if !url.trim().is_empty() {
        self.api.base_url = url.trim().to_string();
      }
    }
    if let Ok(raw) = std::env::var("QUIZ_API_TIMEOUT_SECS") {
      match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => self.api.timeout_secs = secs,
        _ => warn!(target: "codequiz", value = %raw, "Ignoring invalid QUIZ_API_TIMEOUT_SECS"),
      }
    }
    if let Ok(path) = std::env::var("QUIZ_PREFS_PATH") {
      if !path.trim().is_empty() {
        self.preferences_path = Some(PathBuf::from(path.trim()));
      }
    }
  }
}

/// Load config from QUIZ_CONFIG_PATH (if set) and env. IO/parse errors fall back to defaults.
pub fn load_client_config_from_env() -> ClientConfig {
  let mut cfg = match std::env::var("QUIZ_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match ClientConfig::from_toml_str(&s) {
        Ok(cfg) => {
          info!(target: "codequiz", %path, "Loaded client config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "codequiz", %path, error = %e, "Failed to parse TOML config; using defaults");
          ClientConfig::default()
        }
      },
      Err(e) => {
        error!(target: "codequiz", %path, error = %e, "Failed to read TOML config file; using defaults");
        ClientConfig::default()
      }
    },
    Err(_) => ClientConfig::default(),
  };
  cfg.apply_env_overrides();
  cfg
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_defaults() {
    let cfg = ClientConfig::from_toml_str("[api]\ntimeout_secs = 5\n").unwrap();
    assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.api.timeout_secs, 5);
    assert_eq!(cfg.preferences_path, None);
  }

  #[test]
  fn full_toml_parses() {
    let cfg = ClientConfig::from_toml_str(
      "preferences_path = \"/tmp/p.toml\"\n[api]\nbase_url = \"http://q/api\"\ntimeout_secs = 7\n",
    )
    .unwrap();
    assert_eq!(cfg.api, ApiConfig { base_url: "http://q/api".into(), timeout_secs: 7 });
    assert_eq!(cfg.preferences_path, Some(PathBuf::from("/tmp/p.toml")));
  }

  #[test]
  fn zero_timeout_is_rejected() {
    let err = ClientConfig::from_toml_str("[api]\ntimeout_secs = 0\n").unwrap_err();
    assert!(err.contains("timeout_secs"), "{err}");
  }

  #[test]
  fn bad_toml_is_an_error() {
    assert!(ClientConfig::from_toml_str("[api]\ntimeout_secs = \"soon\"").is_err());
  }
}
