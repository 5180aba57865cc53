// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::sync::Arc;

use chrono::{DateTime, Local};
use log::debug;

use crate::cache::{Refresh, StalenessCache};
use crate::config::DomainDir;
use crate::errors::IndexError;
use crate::query::{open_file, FileView, Selection};
use crate::scan::SequenceGroup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSummary {
    pub label: String,
    pub sequence_count: usize,
    pub island_total: usize,
    pub updated_at: Option<DateTime<Local>>,
}

/// Read-only view over the configured result directories. Every query first runs a refresh
/// cycle, so answers follow the files on disk.
pub struct ResultIndex {
    domains: Vec<DomainDir>,
    cache: Arc<StalenessCache>,
}

impl ResultIndex {
    pub fn new(domains: Vec<DomainDir>) -> Self {
        Self::with_cache(domains, Arc::new(StalenessCache::new()))
    }

    // Several indexes (e.g. one per front end) can share one cache.
    pub fn with_cache(domains: Vec<DomainDir>, cache: Arc<StalenessCache>) -> Self {
        ResultIndex { domains, cache }
    }

    pub fn domains(&self) -> &[DomainDir] {
        &self.domains
    }

    pub fn cache(&self) -> &Arc<StalenessCache> {
        &self.cache
    }

    pub fn refresh(&self) -> Refresh {
        self.cache.refresh(&self.domains)
    }

    pub fn summary(&self) -> Vec<DomainSummary> {
        let refresh = self.refresh();
        self.domains
            .iter()
            .map(|domain| DomainSummary {
                label: domain.label.clone(),
                sequence_count: refresh
                    .groups
                    .values()
                    .filter(|g| g.domain == domain.label)
                    .count(),
                island_total: refresh.snapshot.island_total(&domain.label),
                updated_at: refresh.snapshot.updated_at(&domain.label).copied(),
            })
            .collect()
    }

    pub fn groups(&self) -> Vec<SequenceGroup> {
        self.refresh().groups.into_values().collect()
    }

    pub fn groups_in_domain(&self, label: &str) -> Vec<SequenceGroup> {
        self.refresh()
            .groups
            .into_values()
            .filter(|g| g.domain.eq_ignore_ascii_case(label))
            .collect()
    }

    pub fn group(&self, seq_id: &str) -> Result<SequenceGroup, IndexError> {
        self.refresh()
            .groups
            .remove(seq_id)
            .ok_or_else(|| IndexError::NotFound(format!("Sequence ID {}", seq_id)))
    }

    pub fn view_file(
        &self,
        seq_id: &str,
        filename: &str,
        selection: &Selection,
    ) -> Result<FileView, IndexError> {
        let group = self.group(seq_id)?;
        debug!("Viewing {} of {} ({:?})", filename, seq_id, selection);
        open_file(&group, filename, selection)
    }
}
