//! Project configuration read from `namecheck.json` at the source root.
//!
//! Only the text renamer consults it. A missing file means defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::utils::io;
use crate::Result;

pub const CONFIG_FILE: &str = "namecheck.json";

const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["cs"];

/// Engine output, package caches and VCS metadata never hold project scripts.
const DEFAULT_SKIP_DIRS: &[&str] = &[".git", "Library", "Temp", "obj", "bin", "node_modules"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamecheckConfig {
    /// File extensions (without the dot) scanned for references.
    pub source_extensions: Vec<String>,
    /// Directory names skipped at any depth.
    pub skip_dirs: Vec<String>,
}

impl Default for NamecheckConfig {
    fn default() -> Self {
        Self {
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NamecheckConfig {
    /// Whether a file's extension is one of the configured source extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.source_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }

    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }

    fn validate(self, path: &str) -> Result<Self> {
        if self.source_extensions.is_empty() {
            return Err(Error::config_invalid_value(
                "sourceExtensions",
                None,
                format!("{} must list at least one extension", path),
            ));
        }

        if let Some(bad) = self
            .source_extensions
            .iter()
            .find(|e| e.trim().is_empty() || e.starts_with('.'))
        {
            return Err(Error::config_invalid_value(
                "sourceExtensions",
                Some(bad.clone()),
                "Extensions are written without a leading dot, e.g. \"cs\"",
            ));
        }

        Ok(self)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse configuration text. `path` is only used in error details.
pub fn from_str(content: &str, path: &str) -> Result<NamecheckConfig> {
    let config: NamecheckConfig =
        serde_json::from_str(content).map_err(|e| Error::config_invalid_json(path, e))?;
    config.validate(path)
}

/// Load `namecheck.json` from `root`, or defaults when it does not exist.
pub fn load(root: &Path) -> Result<NamecheckConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(NamecheckConfig::default());
    }

    let display = path.display().to_string();
    log_status!("config", "Using {}", display);

    let content = io::read_file(&path, &format!("read {}", display))?;
    from_str(&content, &display)
}
