// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::{fs, path::Path};

use tempfile::TempDir;

use mgeview::{config::DomainDir, index::ResultIndex};

pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("writing test file");
}

pub fn tagged_entries(ids: &[&str]) -> String {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            format!(
                "<GI> {}\n<COORDINATES> {}-{}\n<END>\n",
                id,
                i * 1000 + 1,
                i * 1000 + 500
            )
        })
        .collect()
}

// Builds one temporary result directory per domain label, lets `populate` fill them, and hands
// the index over them to `f`.
pub fn with_rig<P, F>(labels: &[&str], populate: P, mut f: F)
where
    P: FnOnce(&[TempDir]),
    F: FnMut(&ResultIndex, &[TempDir]),
{
    let dirs: Vec<TempDir> = labels
        .iter()
        .map(|_| tempfile::tempdir().expect("creating result directory"))
        .collect();
    populate(&dirs);
    let domains = labels
        .iter()
        .zip(&dirs)
        .map(|(label, dir)| DomainDir::new(*label, dir.path()))
        .collect();
    let index = ResultIndex::new(domains);
    f(&index, &dirs);
}
