//! Project manifest (helpsrc.yaml) parsing.
//!
//! The manifest lists help source files in parse order, so a project
//! can run `helpsrc check` or `helpsrc report` with no arguments.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HelpError, Result};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "helpsrc.yaml";

/// Project manifest loaded from helpsrc.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Help source files, parsed in list order.
    pub sources: Vec<PathBuf>,
}

impl Manifest {
    /// Load manifest from a helpsrc.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HelpError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| HelpError::Manifest {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check helpsrc.yaml syntax; sources must be a list of paths".to_string()),
        })
    }
}
