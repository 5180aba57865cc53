// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{fmt, io};

#[derive(Debug)]
pub enum IndexError {
    Io(io::Error),
    Format(String),
    Config(String),
    NotFound(String),
    UnsupportedFormat(String),
}

// These allow conversion to IndexError, required for main() to return Result<()> and for '?' to
// work.

impl From<io::Error> for IndexError {
    fn from(e: io::Error) -> Self {
        IndexError::Io(e)
    }
}

impl From<String> for IndexError {
    fn from(s: String) -> Self {
        IndexError::Format(s)
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(e: serde_json::Error) -> Self {
        IndexError::Format(e.to_string())
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Io(e) => write!(f, "I/O error: {}", e),
            IndexError::Format(msg) => write!(f, "Format error: {}", msg),
            IndexError::Config(msg) => write!(f, "Configuration error: {}", msg),
            IndexError::NotFound(what) => write!(f, "{} not found", what),
            IndexError::UnsupportedFormat(ext) => write!(f, "Unsupported file type: {}", ext),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Io(e) => Some(e),
            _ => None,
        }
    }
}
