// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// A record for one annotated region (genomic island) inside a result file. Meant to be
// format-agnostic - the same record comes out of tagged-block (.out) and FastA (.fas) files.

use std::fmt;

/// Text written in place of an identifier or coordinate range that could not be parsed.
pub const UNKNOWN: &str = "Unknown";

/// A parsed field which may have degraded to the [`UNKNOWN`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Known(String),
    Unknown,
}

impl Field {
    pub fn from_capture(capture: Option<&str>) -> Self {
        match capture {
            Some(text) => Field::Known(text.to_string()),
            None => Field::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Field::Known(text) => text,
            Field::Unknown => UNKNOWN,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub id: Field,
    pub coordinates: Field,
    /// Cleaned source text of the entry, as shown to the user.
    pub block: String,
}

impl AnnotationRecord {
    // False if either the id or the coordinates fell back to the sentinel.
    pub fn is_complete(&self) -> bool {
        self.id.is_known() && self.coordinates.is_known()
    }
}
