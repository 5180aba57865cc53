// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::seq::file::{read_text, RecordSet};
use crate::seq::record::{AnnotationRecord, Field};

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)>.*?\n[^>]+").expect("valid entry regex"));
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">([\w:.]+)").expect("valid id regex"));
static COORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+-\d+)\]").expect("valid coordinates regex"));
static DNA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ACGTacgt]+$").expect("valid nucleotide regex"));

// Each record keeps its header line and only those lines that are pure nucleotide sequence;
// blank lines, comments and wrapped annotation are dropped.
pub fn parse_sequence_blocks(content: &str) -> RecordSet {
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
            let mut lines = entry.lines();
            let header = lines.next().unwrap_or_default();
            let seq_lines: Vec<&str> = lines.filter(|l| DNA_RE.is_match(l)).collect();
            let block = format!("{}\n{}", header, seq_lines.join("\n"));
            AnnotationRecord {
                id,
                coordinates,
                block: block.trim().to_string(),
            }
        })
        .collect()
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<RecordSet, std::io::Error> {
    let content = read_text(path)?;
    Ok(parse_sequence_blocks(&content))
}
