// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// Serialisable forms of index results, for `--json` output.

use serde::Serialize;

use crate::index::DomainSummary;
use crate::query::FileView;
use crate::scan::{format_timestamp, FileKind, SequenceGroup};

#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub seq_id: String,
    pub organism: String,
    pub domain: String,
    pub source_dir: String,
    pub files: Vec<String>,
    pub island_count: usize,
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub domain: String,
    pub sequences: usize,
    pub islands: usize,
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ViewReport {
    pub filename: String,
    pub kind: ReportFileKind,
    pub record_ids: Vec<String>,
    pub coordinates: Vec<String>,
    pub content: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFileKind {
    Svg,
    Out,
    Fasta,
    Other,
}

impl From<FileKind> for ReportFileKind {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Graphic => ReportFileKind::Svg,
            FileKind::Tagged => ReportFileKind::Out,
            FileKind::Sequence => ReportFileKind::Fasta,
            FileKind::Other => ReportFileKind::Other,
        }
    }
}

impl From<&SequenceGroup> for GroupReport {
    fn from(group: &SequenceGroup) -> Self {
        GroupReport {
            seq_id: group.seq_id.clone(),
            organism: group.organism.clone(),
            domain: group.domain.clone(),
            source_dir: group.source_dir.display().to_string(),
            files: group.files.clone(),
            island_count: group.island_count,
            last_updated: group.last_updated_text(),
        }
    }
}

impl From<&DomainSummary> for SummaryReport {
    fn from(summary: &DomainSummary) -> Self {
        SummaryReport {
            domain: summary.label.clone(),
            sequences: summary.sequence_count,
            islands: summary.island_total,
            updated_at: summary
                .updated_at
                .as_ref()
                .map(|ts| format_timestamp(Some(ts))),
        }
    }
}

impl From<FileView> for ViewReport {
    fn from(view: FileView) -> Self {
        match view {
            FileView::Graphic { filename, content } => ViewReport {
                filename,
                kind: ReportFileKind::Svg,
                record_ids: Vec::new(),
                coordinates: Vec::new(),
                content,
            },
            FileView::Records(view) => ViewReport {
                filename: view.filename,
                kind: view.kind.into(),
                record_ids: view.record_ids,
                coordinates: view.coordinates,
                content: view.selected,
            },
        }
    }
}
