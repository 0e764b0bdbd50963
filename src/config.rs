//! Loading the user's service-worker cache configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::selection::FileSelector;

/// Configuration file names searched for in the project root, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".service-worker-rc", ".service-worker-rc.json"];

/// User configuration controlling which assets the service worker caches.
///
/// An absent configuration file, or a file without the `filesToCache` key, means every
/// asset in the graph is cached.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
  /// Ordered selectors for the assets to cache; absent means cache everything.
  #[serde(default)]
  pub files_to_cache: Option<Vec<FileSelector>>,
}

/// Errors that can occur while loading the cache configuration.
#[derive(Debug)]
pub enum RuntimeConfigError {
  /// Failed to read the configuration file from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration file.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl RuntimeConfig {
  /// Load configuration from a specific file if present.
  ///
  /// A missing file is not an error: the user may simply not have narrowed the cache
  /// down, in which case everything is cached.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RuntimeConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(RuntimeConfigError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    serde_json::from_str(&contents).map_err(|err| RuntimeConfigError::Parse {
      path: path.to_path_buf(),
      source: err,
    })
  }

  /// Discover configuration in the project root, trying [`CONFIG_FILE_NAMES`] in order.
  pub fn discover(project_root: impl AsRef<Path>) -> Result<Self, RuntimeConfigError> {
    for name in CONFIG_FILE_NAMES {
      let candidate = project_root.as_ref().join(name);
      if candidate.exists() {
        return Self::load_from_path(candidate);
      }
    }
    Ok(Self::default())
  }
}

impl std::fmt::Display for RuntimeConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for RuntimeConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn missing_file_yields_the_cache_everything_default() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(".service-worker-rc");

    let config = RuntimeConfig::load_from_path(&path)
      .expect("missing files should not produce an error");

    assert!(config.files_to_cache.is_none());
  }

  #[test]
  fn discover_returns_the_default_when_no_file_exists() {
    let temp = tempdir().expect("failed to create temp dir");

    let config = RuntimeConfig::discover(temp.path()).expect("discovery should succeed");

    assert!(config.files_to_cache.is_none());
  }

  #[test]
  fn discover_prefers_the_bare_rc_file() {
    let temp = tempdir().expect("failed to create temp dir");
    std::fs::write(
      temp.path().join(".service-worker-rc"),
      r#"{"filesToCache": ["src/a.html"]}"#,
    )
    .expect("failed to write rc file");
    std::fs::write(
      temp.path().join(".service-worker-rc.json"),
      r#"{"filesToCache": ["src/b.html"]}"#,
    )
    .expect("failed to write rc.json file");

    let config = RuntimeConfig::discover(temp.path()).expect("discovery should succeed");
    let selectors = config.files_to_cache.expect("selectors should be present");

    assert_eq!(selectors.len(), 1);
    assert_eq!(selectors[0].file(), "src/a.html");
  }

  #[test]
  fn discover_falls_back_to_the_json_spelling() {
    let temp = tempdir().expect("failed to create temp dir");
    std::fs::write(
      temp.path().join(".service-worker-rc.json"),
      r#"{"filesToCache": [{"file": "src/b.html", "includeChildren": true}]}"#,
    )
    .expect("failed to write rc.json file");

    let config = RuntimeConfig::discover(temp.path()).expect("discovery should succeed");
    let selectors = config.files_to_cache.expect("selectors should be present");

    assert_eq!(selectors[0].file(), "src/b.html");
    assert!(selectors[0].include_children());
  }

  #[test]
  fn a_file_without_the_cache_key_means_cache_everything() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(".service-worker-rc");
    std::fs::write(&path, "{}").expect("failed to write rc file");

    let config = RuntimeConfig::load_from_path(&path).expect("configuration should load");

    assert!(config.files_to_cache.is_none());
  }

  #[test]
  fn malformed_json_reports_the_offending_path() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(".service-worker-rc");
    std::fs::write(&path, "{not json").expect("failed to write rc file");

    let err = RuntimeConfig::load_from_path(&path).expect_err("parse errors should surface");

    assert!(matches!(err, RuntimeConfigError::Parse { .. }));
    assert!(err.to_string().contains(".service-worker-rc"));
  }
}
