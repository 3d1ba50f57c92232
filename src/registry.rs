//! Local project registry (`.firebaserc`).
//!
//! Maps logical project keys to cloud project names. Read once per command
//! and never written.
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const REGISTRY_FILE_NAME: &str = ".firebaserc";

/// Parsed registry file. Key order follows the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRegistry {
    pub projects: IndexMap<String, String>,
}

impl ProjectRegistry {
    pub fn project_for(&self, key: &str) -> Option<&str> {
        self.projects.get(key).map(String::as_str)
    }

    /// Key used when neither `--projectKey` nor `PROJECT_KEY` is set.
    pub fn first_key(&self) -> Option<&str> {
        self.projects.keys().next().map(String::as_str)
    }
}

pub fn registry_path(directory: &Path) -> PathBuf {
    directory.join(REGISTRY_FILE_NAME)
}

/// Load and validate the registry file from `directory`.
pub fn load_registry(directory: &Path) -> Result<ProjectRegistry> {
    let path = registry_path(directory);
    if !path.is_file() {
        return Err(anyhow!("missing {}", path.display()));
    }
    let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let registry: ProjectRegistry = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse {} as JSON", path.display()))?;
    validate_registry(&registry)
        .with_context(|| format!("invalid {}", path.display()))?;
    Ok(registry)
}

pub fn validate_registry(registry: &ProjectRegistry) -> Result<()> {
    if registry.projects.is_empty() {
        return Err(anyhow!("\"projects\" must contain at least one entry"));
    }
    if let Some(key) = registry.projects.keys().find(|key| key.trim().is_empty()) {
        return Err(anyhow!("\"projects\" contains an empty key {key:?}"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
