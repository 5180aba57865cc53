// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use std::{collections::HashMap, fs, io, path::Path};

use itertools::Itertools;

use crate::seq::record::AnnotationRecord;

// For our purposes, a parsed result file is a map from record id to record that remembers the
// order in which ids were first seen. Inserting an id a second time replaces the record but keeps
// its original position.

#[derive(Debug, Default, Clone)]
pub struct RecordSet {
    order: Vec<String>,
    records: HashMap<String, AnnotationRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: AnnotationRecord) {
        let key = record.id.as_str().to_string();
        if !self.records.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.records.insert(key, record);
    }

    pub fn get(&self, id: &str) -> Option<&AnnotationRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// All blocks in map order, separated by a blank line.
    pub fn concatenated(&self) -> String {
        self.iter().map(|rec| rec.block.as_str()).join("\n\n")
    }
}

/// Whole file as text. Bytes that are not valid UTF-8 are replaced rather than failing the read.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, io::Error> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl FromIterator<AnnotationRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = AnnotationRecord>>(iter: I) -> Self {
        let mut set = RecordSet::new();
        for rec in iter {
            set.insert(rec);
        }
        set
    }
}
