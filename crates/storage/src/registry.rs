// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog of watched projects, scheduler name patterns and display preferences
//!
//! Removing a project only forgets its metadata; nothing under the project
//! root is ever touched.

use crate::json::{JsonStore, StorageError};
use jw_core::{Clock, DisplayMode, Project, MANIFEST_FILE};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECTS: &str = "projects";
const SETTINGS: &str = "settings";
const PATTERNS: &str = "patterns";
const PATTERNS_ID: &str = "watched";
const PREFERENCES_ID: &str = "preferences";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{} is not a pipeline project root (no {})", .0.display(), MANIFEST_FILE)]
    NotAPipelineRoot(PathBuf),
    #[error("unknown project: {0}")]
    UnknownProject(String),
    #[error("project already registered: {0}")]
    DuplicateProject(String),
    #[error("invalid project name {0:?}: use letters, digits, '.', '-' or '_'")]
    InvalidName(String),
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Settings consumed by enrichment handlers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub display: DisplayMode,
}

#[derive(Debug, Clone)]
pub struct Registry {
    store: JsonStore,
}

impl Registry {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Register a project root.
    ///
    /// The name defaults to the directory's base name.
    pub fn add(
        &self,
        path: &Path,
        name: Option<&str>,
        tag: Option<&str>,
        clock: &impl Clock,
    ) -> Result<Project, RegistryError> {
        let root = path
            .canonicalize()
            .map_err(|_| RegistryError::NotAPipelineRoot(path.to_path_buf()))?;
        if !Project::is_pipeline_root(&root) {
            return Err(RegistryError::NotAPipelineRoot(root));
        }

        let name = match name {
            Some(name) => name.to_string(),
            None => root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        };
        if !is_valid_name(&name) {
            return Err(RegistryError::InvalidName(name));
        }
        if self.store.exists(PROJECTS, &name) {
            return Err(RegistryError::DuplicateProject(name));
        }

        let mut project = Project::new(name, root, clock.now());
        if let Some(tag) = tag {
            project = project.with_tag(tag);
        }
        self.store.save(PROJECTS, &project.name, &project)?;
        tracing::info!(project = %project.name, root = %project.root.display(), "project added");
        Ok(project)
    }

    pub fn remove(&self, name: &str) -> Result<Project, RegistryError> {
        let project = self.get(name)?;
        self.store.delete(PROJECTS, name)?;
        tracing::info!(project = name, "project removed");
        Ok(project)
    }

    pub fn get(&self, name: &str) -> Result<Project, RegistryError> {
        if !is_valid_name(name) {
            return Err(RegistryError::UnknownProject(name.to_string()));
        }
        self.store
            .load(PROJECTS, name)?
            .ok_or_else(|| RegistryError::UnknownProject(name.to_string()))
    }

    /// All projects, alphabetical by name
    pub fn list(&self) -> Result<Vec<Project>, RegistryError> {
        let mut projects = Vec::new();
        for name in self.store.list(PROJECTS)? {
            if let Some(project) = self.store.load(PROJECTS, &name)? {
                projects.push(project);
            }
        }
        Ok(projects)
    }

    /// Watch scheduler jobs whose name matches `pattern` (a regular expression)
    pub fn add_pattern(&self, pattern: &str) -> Result<bool, RegistryError> {
        Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let mut patterns = self.patterns()?;
        if patterns.iter().any(|p| p == pattern) {
            return Ok(false);
        }
        patterns.push(pattern.to_string());
        self.store.save(PATTERNS, PATTERNS_ID, &patterns)?;
        Ok(true)
    }

    pub fn remove_pattern(&self, pattern: &str) -> Result<bool, RegistryError> {
        let mut patterns = self.patterns()?;
        let before = patterns.len();
        patterns.retain(|p| p != pattern);
        if patterns.len() == before {
            return Ok(false);
        }
        self.store.save(PATTERNS, PATTERNS_ID, &patterns)?;
        Ok(true)
    }

    pub fn patterns(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .store
            .load::<Vec<String>>(PATTERNS, PATTERNS_ID)?
            .unwrap_or_default())
    }

    /// Compiled patterns; entries that no longer compile are skipped
    pub fn compiled_patterns(&self) -> Result<Vec<Regex>, RegistryError> {
        Ok(self
            .patterns()?
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "skipping invalid pattern");
                    None
                }
            })
            .collect())
    }

    pub fn preferences(&self) -> Result<Preferences, RegistryError> {
        Ok(self
            .store
            .load(SETTINGS, PREFERENCES_ID)?
            .unwrap_or_default())
    }

    pub fn set_display_mode(&self, display: DisplayMode) -> Result<Preferences, RegistryError> {
        let mut prefs = self.preferences()?;
        prefs.display = display;
        self.store.save(SETTINGS, PREFERENCES_ID, &prefs)?;
        Ok(prefs)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
