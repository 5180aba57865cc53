// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::path::Path;

use log::warn;

use crate::errors::IndexError;
use crate::scan::{FileKind, SequenceGroup};
use crate::seq::fasta::read_fasta_file;
use crate::seq::file::{read_text, RecordSet};
use crate::seq::tagged::read_tagged_file;

/// Which record of a parsed file to show. Empty strings count as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub reset: bool,
    pub record_id: Option<String>,
    pub coordinates: Option<String>,
}

impl Selection {
    pub fn reset() -> Self {
        Selection {
            reset: true,
            ..Default::default()
        }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Selection {
            record_id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn by_coordinates(coords: impl Into<String>) -> Self {
        Selection {
            coordinates: Some(coords.into()),
            ..Default::default()
        }
    }
}

// Order: reset, then id, then coordinates (first match wins, coordinates need not be unique).
// Anything that selects nothing, or an empty block, falls back to the whole file.
pub fn select_block(records: &RecordSet, selection: &Selection) -> String {
    let chosen = if selection.reset {
        None
    } else {
        let id = selection.record_id.as_deref().filter(|s| !s.is_empty());
        let coords = selection.coordinates.as_deref().filter(|s| !s.is_empty());
        match (id.and_then(|id| records.get(id)), coords) {
            (Some(rec), _) => Some(rec.block.as_str()),
            (None, Some(coords)) => records
                .iter()
                .find(|rec| rec.coordinates.as_str() == coords)
                .map(|rec| rec.block.as_str()),
            (None, None) => None,
        }
    };
    match chosen {
        Some(block) if !block.is_empty() => block.to_string(),
        _ => records.concatenated(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub filename: String,
    pub kind: FileKind,
    pub record_ids: Vec<String>,
    pub coordinates: Vec<String>,
    pub selected: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileView {
    // SVG summaries are passed through untouched.
    Graphic { filename: String, content: String },
    Records(RecordView),
}

impl FileView {
    pub fn text(&self) -> &str {
        match self {
            FileView::Graphic { content, .. } => content,
            FileView::Records(view) => &view.selected,
        }
    }
}

fn or_empty<T: Default>(path: &Path, read: Result<T, std::io::Error>) -> T {
    read.unwrap_or_else(|e| {
        warn!("Cannot read {}: {}", path.display(), e);
        T::default()
    })
}

pub fn open_file(
    group: &SequenceGroup,
    filename: &str,
    selection: &Selection,
) -> Result<FileView, IndexError> {
    if !group.files.iter().any(|f| f == filename) {
        return Err(IndexError::NotFound(format!(
            "File {} for {}",
            filename, group.seq_id
        )));
    }
    let path = group.path_of(filename);
    if !path.exists() {
        return Err(IndexError::NotFound(format!(
            "File {} for {}",
            filename, group.seq_id
        )));
    }

    let kind = FileKind::from_filename(filename);
    let records = match kind {
        FileKind::Graphic => {
            return Ok(FileView::Graphic {
                filename: filename.to_string(),
                content: or_empty(&path, read_text(&path)),
            });
        }
        FileKind::Tagged => or_empty(&path, read_tagged_file(&path)),
        FileKind::Sequence => or_empty(&path, read_fasta_file(&path)),
        FileKind::Other => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string();
            return Err(IndexError::UnsupportedFormat(ext));
        }
    };

    let incomplete = records.iter().filter(|rec| !rec.is_complete()).count();
    if incomplete > 0 {
        warn!(
            "{} of {} records in {} lack an id or coordinates",
            incomplete,
            records.len(),
            path.display()
        );
    }

    Ok(FileView::Records(RecordView {
        filename: filename.to_string(),
        kind,
        record_ids: records.ids().map(String::from).collect(),
        coordinates: records
            .iter()
            .map(|rec| rec.coordinates.as_str().to_string())
            .collect(),
        selected: select_block(&records, selection),
    }))
}
