//! Last-used quiz settings. Written after a successful session start, read by
//! the terminal driver to pre-fill the setup prompt.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Difficulty, Language};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPreferences {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub language: Option<Language>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<Difficulty>,
}

pub trait Preferences: Send + Sync {
  fn load(&self) -> QuizPreferences;
  fn save(&self, prefs: QuizPreferences) -> Result<(), String>;
}

/// Process-local store; also the default when no file is configured.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
  inner: Mutex<QuizPreferences>,
}

impl Preferences for MemoryPreferences {
  fn load(&self) -> QuizPreferences {
    self.inner.lock().map(|p| *p).unwrap_or_default()
  }

  fn save(&self, prefs: QuizPreferences) -> Result<(), String> {
    let mut guard = self.inner.lock().map_err(|e| e.to_string())?;
    *guard = prefs;
    Ok(())
  }
}

/// TOML file store. A missing or unreadable file loads as empty preferences.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
  path: PathBuf,
}

impl TomlPreferences {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Preferences for TomlPreferences {
  fn load(&self) -> QuizPreferences {
    let Ok(s) = std::fs::read_to_string(&self.path) else {
      return QuizPreferences::default();
    };
    toml::from_str(&s).unwrap_or_else(|e| {
      debug!(target: "codequiz", path = %self.path.display(), error = %e, "Ignoring unparsable preferences file");
      QuizPreferences::default()
    })
  }

  fn save(&self, prefs: QuizPreferences) -> Result<(), String> {
    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      std::fs::create_dir_all(dir).map_err(|e| format!("create {}: {}", dir.display(), e))?;
    }
    let body = toml::to_string(&prefs).map_err(|e| e.to_string())?;
    std::fs::write(&self.path, body).map_err(|e| format!("write {}: {}", self.path.display(), e))
  }
}
