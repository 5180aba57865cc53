// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::errors::IndexError;

pub const CONFIG_FILENAME: &str = ".mgeviewconfig";

/// One result directory and the domain label its sequences are counted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDir {
    pub label: String,
    pub path: PathBuf,
}

impl DomainDir {
    pub fn new(label: impl Into<String>, path: impl AsRef<Path>) -> Self {
        DomainDir {
            label: label.into(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

// LABEL=DIR, as given on the command line.
impl FromStr for DomainDir {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((label, path)) if !label.trim().is_empty() && !path.trim().is_empty() => {
                Ok(DomainDir::new(label.trim(), path.trim()))
            }
            _ => Err(IndexError::Config(format!(
                "expected LABEL=DIR, got '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub domains: Vec<DomainDir>,
}

impl IndexConfig {
    pub fn from_file(path: &Path) -> Result<Self, IndexError> {
        let text = fs::read_to_string(path)?;
        let config: IndexConfig = serde_json::from_str(&text)?;
        Ok(config)
    }
}

pub fn find_config() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let path = PathBuf::from(home).join(CONFIG_FILENAME);
        if path.exists() {
            return Some(path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let path = cwd.join(CONFIG_FILENAME);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// `archaea` -> `Archaea`
pub fn display_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
