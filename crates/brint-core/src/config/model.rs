use crate::error::{BrintError, Result};
use crate::version::{parse_version, SemanticVersion};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Brint.toml schema
///
/// ```toml
/// version = "3.0.0"
/// name = "my-app"   # optional
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrintConfig {
    /// 現在のアプリケーションバージョン
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl BrintConfig {
    /// Brint.toml を読み込む
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BrintError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| BrintError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse the declared version
    pub fn current_version(&self) -> Result<SemanticVersion> {
        parse_version(&self.version)
    }
}
