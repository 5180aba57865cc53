// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Groups the files of one or more result directories by sequence id. Result files are named
// `<organism>_[<sequence id>]_MGE.<ext>`; anything else is ignored.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use chrono::{DateTime, Local};
use itertools::Itertools;
use log::{debug, warn};
use regex::Regex;

use crate::config::DomainDir;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const NOT_AVAILABLE: &str = "N/A";

static RESULT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)_\[(.+)\]_MGE\.(.+)$").expect("valid result filename regex")
});

/// Kind of result file, as told by its extension. Variants are in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileKind {
    Graphic,
    Tagged,
    Sequence,
    Other,
}

impl FileKind {
    pub fn from_filename(fname: &str) -> Self {
        let ext = Path::new(fname)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => FileKind::Graphic,
            Some("out") => FileKind::Tagged,
            Some("fas") | Some("fasta") => FileKind::Sequence,
            _ => FileKind::Other,
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceGroup {
    pub seq_id: String,
    pub organism: String,
    pub domain: String,
    pub source_dir: PathBuf,
    pub files: Vec<String>,
    // Derived on refresh, from the group's tagged-block files.
    pub island_count: usize,
    pub last_updated: Option<DateTime<Local>>,
}

impl SequenceGroup {
    pub fn path_of(&self, fname: &str) -> PathBuf {
        self.source_dir.join(fname)
    }

    pub fn tagged_files(&self) -> impl Iterator<Item = &str> + '_ {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|f| FileKind::from_filename(f) == FileKind::Tagged)
    }

    pub fn last_updated_text(&self) -> String {
        format_timestamp(self.last_updated.as_ref())
    }
}

pub type GroupMap = BTreeMap<String, SequenceGroup>;

pub fn format_timestamp(ts: Option<&DateTime<Local>>) -> String {
    match ts {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => String::from(NOT_AVAILABLE),
    }
}

// Names of the regular entries of a directory, sorted so that discovery order is reproducible. A
// missing or unreadable directory counts as empty.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Result directory {} does not exist", dir.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Cannot list result directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .sorted()
        .collect()
}

pub fn scan(domains: &[DomainDir]) -> GroupMap {
    let mut groups = GroupMap::new();
    for domain in domains {
        for fname in list_dir(&domain.path) {
            let Some(caps) = RESULT_NAME_RE.captures(&fname) else {
                debug!("Skipping {} (not a result file)", fname);
                continue;
            };
            let seq_id = caps[2].to_string();
            let group = groups
                .entry(seq_id.clone())
                .or_insert_with(|| SequenceGroup {
                    seq_id,
                    organism: caps[1].to_string(),
                    domain: domain.label.clone(),
                    source_dir: domain.path.clone(),
                    files: Vec::new(),
                    island_count: 0,
                    last_updated: None,
                });
            group.files.push(fname);
        }
    }
    for group in groups.values_mut() {
        let files = std::mem::take(&mut group.files);
        group.files = files
            .into_iter()
            .unique()
            .sorted_by_key(|f| FileKind::from_filename(f).rank())
            .collect();
    }
    groups
}
