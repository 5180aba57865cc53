// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

// Tagged-block (.out) files: each island is a `<GI> id ... <COORDINATES> start-end ... <END>`
// span. Anything between spans is ignored.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::seq::file::{read_text, RecordSet};
use crate::seq::record::{AnnotationRecord, Field};

pub const START_MARKER: &str = "<GI>";

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<GI>.*?<END>").expect("valid entry regex"));
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<GI>\s*([\w:.]+)").expect("valid id regex"));
static COORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<COORDINATES>\s*([\d-]+)").expect("valid coordinates regex"));

pub fn parse_tagged_blocks(content: &str) -> RecordSet {
    ENTRY_RE
        .find_iter(content)
        .map(|entry| {
            let entry = entry.as_str();
            let id = Field::from_capture(
                ID_RE
                    .captures(entry)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str()),
            );
            let coordinates = Field::from_capture(
                COORDS_RE
                    .captures(entry)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str()),
            );
            AnnotationRecord {
                id,
                coordinates,
                block: entry.trim().to_string(),
            }
        })
        .collect()
}

pub fn read_tagged_file<P: AsRef<Path>>(path: P) -> Result<RecordSet, io::Error> {
    let content = read_text(path)?;
    Ok(parse_tagged_blocks(&content))
}

/// Number of lines that open an island. Cheaper than a full parse, and what the island totals are
/// based on.
pub fn count_islands<P: AsRef<Path>>(path: P) -> Result<usize, io::Error> {
    let file = File::open(path)?;
    let mut count = 0;
    for line in BufReader::new(file).split(b'\n') {
        if line?.starts_with(START_MARKER.as_bytes()) {
            count += 1;
        }
    }
    Ok(count)
}
