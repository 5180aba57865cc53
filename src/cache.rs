// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

// Island totals per domain are only recomputed when the set of tagged-block files, or any of their
// modification times, changed since the last refresh. Readers always see one complete snapshot:
// a new snapshot is built aside and swapped in whole.

use std::{
    collections::HashMap,
    fs,
    path::Path,
    sync::{Arc, RwLock},
    time::SystemTime,
};

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::config::DomainDir;
use crate::scan::{list_dir, scan, FileKind, GroupMap, SequenceGroup};
use crate::seq::tagged::count_islands;

/// (domain label, filename)
pub type FileKey = (String, String);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    /// 0 until the first recompute.
    pub generation: u64,
    pub file_timestamps: HashMap<FileKey, SystemTime>,
    pub island_totals: HashMap<String, usize>,
    pub updated_at: HashMap<String, DateTime<Local>>,
}

impl CacheSnapshot {
    pub fn island_total(&self, domain: &str) -> usize {
        self.island_totals.get(domain).copied().unwrap_or(0)
    }

    pub fn updated_at(&self, domain: &str) -> Option<&DateTime<Local>> {
        self.updated_at.get(domain)
    }

    fn is_current(&self, timestamps: &HashMap<FileKey, SystemTime>) -> bool {
        self.generation > 0 && &self.file_timestamps == timestamps
    }
}

/// Outcome of one refresh cycle.
pub struct Refresh {
    pub groups: GroupMap,
    pub snapshot: Arc<CacheSnapshot>,
    pub recomputed: bool,
}

#[derive(Debug, Default)]
pub struct StalenessCache {
    current: RwLock<Arc<CacheSnapshot>>,
}

impl StalenessCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn refresh(&self, domains: &[DomainDir]) -> Refresh {
        // Taken before any file is read: a file rewritten while counting then shows up as a
        // changed timestamp on the next refresh.
        let timestamps = tagged_file_timestamps(domains);
        self.refresh_from(domains, timestamps)
    }

    fn refresh_from(
        &self,
        domains: &[DomainDir],
        timestamps: HashMap<FileKey, SystemTime>,
    ) -> Refresh {
        let mut groups = scan(domains);
        for group in groups.values_mut() {
            fill_derived(group);
        }

        let current = self.snapshot();
        if current.is_current(&timestamps) {
            debug!("No result file changed; keeping snapshot #{}", current.generation);
            return Refresh {
                groups,
                snapshot: current,
                recomputed: false,
            };
        }

        let mut island_totals: HashMap<String, usize> = domains
            .iter()
            .map(|d| (d.label.clone(), 0))
            .collect();
        for group in groups.values() {
            *island_totals.entry(group.domain.clone()).or_insert(0) += group.island_count;
        }
        let now = Local::now();
        let updated_at = island_totals.keys().map(|d| (d.clone(), now)).collect();

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        // Another refresh may have got here first with the same view of the files.
        if guard.is_current(&timestamps) {
            return Refresh {
                groups,
                snapshot: Arc::clone(&guard),
                recomputed: false,
            };
        }
        let fresh = Arc::new(CacheSnapshot {
            generation: guard.generation + 1,
            file_timestamps: timestamps,
            island_totals,
            updated_at,
        });
        info!(
            "Result files changed; recomputed island totals (snapshot #{})",
            fresh.generation
        );
        *guard = Arc::clone(&fresh);
        Refresh {
            groups,
            snapshot: fresh,
            recomputed: true,
        }
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

// Island count and latest modification time over the group's tagged-block files. These are
// computed on every refresh, whether or not the totals are.
fn fill_derived(group: &mut SequenceGroup) {
    let mut island_count = 0;
    let mut last_updated: Option<DateTime<Local>> = None;
    for fname in group.tagged_files() {
        let path = group.path_of(fname);
        match count_islands(&path) {
            Ok(n) => island_count += n,
            Err(e) => warn!("Cannot count islands in {}: {}", path.display(), e),
        }
        if let Some(mtime) = modified_at(&path) {
            let mtime: DateTime<Local> = mtime.into();
            last_updated = last_updated.max(Some(mtime));
        }
    }
    group.island_count = island_count;
    group.last_updated = last_updated;
}

fn tagged_file_timestamps(domains: &[DomainDir]) -> HashMap<FileKey, SystemTime> {
    let mut timestamps = HashMap::new();
    for domain in domains {
        for fname in list_dir(&domain.path) {
            if FileKind::from_filename(&fname) != FileKind::Tagged {
                continue;
            }
            // A file removed since the listing is simply left out.
            if let Some(mtime) = modified_at(&domain.path.join(&fname)) {
                timestamps.insert((domain.label.clone(), fname), mtime);
            }
        }
    }
    timestamps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;

    const TWO_ISLANDS: &str = "<GI> GI:001\n<COORDINATES> 10-500\n<END>\n\
                               <GI> GI:002\n<COORDINATES> 900-1500\n<END>\n";

    fn set_mtime(path: &Path, secs: u64) {
        let file = File::options().write(true).open(path).expect("open");
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .expect("set mtime");
    }

    #[test]
    fn test_cold_start_recomputes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let domains = [DomainDir::new("archaea", dir.path())];
        let cache = StalenessCache::new();
        assert_eq!(cache.snapshot().generation, 0);

        let refresh = cache.refresh(&domains);
        assert!(refresh.recomputed);
        assert_eq!(refresh.snapshot.generation, 1);
        assert_eq!(refresh.snapshot.island_total("archaea"), 0);
        assert!(refresh.snapshot.updated_at("archaea").is_some());
    }

    #[test]
    fn test_unchanged_files_keep_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("OrgA_[SEQ1]_MGE.out");
        fs::write(&out, TWO_ISLANDS).expect("write");
        let domains = [DomainDir::new("archaea", dir.path())];
        let cache = StalenessCache::new();

        let first = cache.refresh(&domains);
        let second = cache.refresh(&domains);
        assert!(first.recomputed);
        assert!(!second.recomputed);
        assert!(Arc::ptr_eq(&first.snapshot, &second.snapshot));
        assert_eq!(
            first.snapshot.updated_at("archaea"),
            second.snapshot.updated_at("archaea")
        );
        assert_eq!(first.groups["SEQ1"].island_count, 2);
        assert_eq!(second.groups["SEQ1"].island_count, 2);
    }

    #[test]
    fn test_touched_file_triggers_recompute() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("OrgA_[SEQ1]_MGE.out");
        fs::write(&out, TWO_ISLANDS).expect("write");
        set_mtime(&out, 1_000_000);
        let domains = [DomainDir::new("archaea", dir.path())];
        let cache = StalenessCache::new();
        let first = cache.refresh(&domains);

        fs::write(&out, "<GI> GI:009\n<COORDINATES> 1-2\n<END>\n").expect("rewrite");
        set_mtime(&out, 2_000_000);
        let second = cache.refresh(&domains);
        assert!(second.recomputed);
        assert_eq!(second.snapshot.generation, first.snapshot.generation + 1);
        assert_eq!(first.snapshot.island_total("archaea"), 2);
        assert_eq!(second.snapshot.island_total("archaea"), 1);
    }

    #[test]
    fn test_new_file_triggers_recompute() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("OrgA_[SEQ1]_MGE.out"), TWO_ISLANDS).expect("write");
        let domains = [DomainDir::new("archaea", dir.path())];
        let cache = StalenessCache::new();
        cache.refresh(&domains);

        fs::write(dir.path().join("OrgB_[SEQ2]_MGE.out"), TWO_ISLANDS).expect("write");
        let refresh = cache.refresh(&domains);
        assert!(refresh.recomputed);
        assert_eq!(refresh.snapshot.island_total("archaea"), 4);
        assert_eq!(refresh.snapshot.file_timestamps.len(), 2);
    }

    #[test]
    fn test_non_tagged_files_do_not_invalidate() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("OrgA_[SEQ1]_MGE.out"), TWO_ISLANDS).expect("write");
        let domains = [DomainDir::new("archaea", dir.path())];
        let cache = StalenessCache::new();
        cache.refresh(&domains);

        fs::write(dir.path().join("OrgA_[SEQ1]_MGE.svg"), "<svg/>").expect("write");
        let refresh = cache.refresh(&domains);
        assert!(!refresh.recomputed);
        assert_eq!(refresh.groups["SEQ1"].files.len(), 2);
    }

    #[test]
    fn test_group_without_tagged_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("OrgA_[SEQ1]_MGE.svg"), "<svg/>").expect("write");
        let refresh = StalenessCache::new().refresh(&[DomainDir::new("archaea", dir.path())]);
        let group = &refresh.groups["SEQ1"];
        assert_eq!(group.island_count, 0);
        assert_eq!(group.last_updated, None);
        assert_eq!(group.last_updated_text(), "N/A");
    }

    #[test]
    fn test_file_rewritten_while_counting_is_picked_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("OrgA_[SEQ1]_MGE.out");
        fs::write(&out, TWO_ISLANDS).expect("write");
        set_mtime(&out, 1_000_000);
        let domains = [DomainDir::new("archaea", dir.path())];
        let cache = StalenessCache::new();

        let timestamps = tagged_file_timestamps(&domains);
        fs::write(&out, "<GI> GI:009\n<COORDINATES> 1-2\n<END>\n").expect("rewrite");
        set_mtime(&out, 2_000_000);
        let racy = cache.refresh_from(&domains, timestamps);
        assert!(racy.recomputed);
        assert_eq!(racy.snapshot.island_total("archaea"), 1);

        let next = cache.refresh(&domains);
        assert!(next.recomputed);
        assert_eq!(next.snapshot.island_total("archaea"), 1);
        assert!(!cache.refresh(&domains).recomputed);
    }

    #[test]
    fn test_last_updated_is_latest_tagged_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let older = dir.path().join("OrgA_[SEQ1]_MGE.out");
        let newer = dir.path().join("OrgB_[SEQ1]_MGE.out");
        fs::write(&older, TWO_ISLANDS).expect("write");
        fs::write(&newer, "<GI> GI:003\n<COORDINATES> 5-9\n<END>\n").expect("write");
        set_mtime(&older, 3_000_000);
        set_mtime(&newer, 1_000_000);

        let refresh = StalenessCache::new().refresh(&[DomainDir::new("archaea", dir.path())]);
        let group = &refresh.groups["SEQ1"];
        let expected: DateTime<Local> =
            (SystemTime::UNIX_EPOCH + Duration::from_secs(3_000_000)).into();
        assert_eq!(group.island_count, 3);
        assert_eq!(group.last_updated, Some(expected));
    }

    #[test]
    fn test_non_utf8_header_still_counts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut content = b"Escherichia coli K-12 \xe9\n".to_vec();
        content.extend_from_slice(TWO_ISLANDS.as_bytes());
        fs::write(dir.path().join("OrgA_[SEQ1]_MGE.out"), content).expect("write");

        let refresh = StalenessCache::new().refresh(&[DomainDir::new("archaea", dir.path())]);
        assert_eq!(refresh.groups["SEQ1"].island_count, 2);
        assert_eq!(refresh.snapshot.island_total("archaea"), 2);
    }

    #[test]
    fn test_totals_per_domain() {
        let archaea = tempfile::tempdir().expect("tempdir");
        let bacteria = tempfile::tempdir().expect("tempdir");
        fs::write(archaea.path().join("OrgA_[SEQ1]_MGE.out"), TWO_ISLANDS).expect("write");
        fs::write(
            bacteria.path().join("OrgB_[SEQ2]_MGE.out"),
            "<GI> GI:1\n<END>\n",
        )
        .expect("write");
        let domains = [
            DomainDir::new("archaea", archaea.path()),
            DomainDir::new("bacteria", bacteria.path()),
        ];
        let refresh = StalenessCache::new().refresh(&domains);
        assert_eq!(refresh.snapshot.island_total("archaea"), 2);
        assert_eq!(refresh.snapshot.island_total("bacteria"), 1);
        assert_eq!(
            refresh.snapshot.updated_at("archaea"),
            refresh.snapshot.updated_at("bacteria")
        );
    }

    #[test]
    fn test_readers_see_whole_snapshots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("OrgA_[SEQ1]_MGE.out");
        fs::write(&out, TWO_ISLANDS).expect("write");
        let domains = [DomainDir::new("archaea", dir.path())];
        let cache = Arc::new(StalenessCache::new());
        cache.refresh(&domains);

        let reader = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let snap = cache.snapshot();
                    // Totals and file states always belong to the same generation.
                    let expected = if snap.file_timestamps.len() == 2 { 4 } else { 2 };
                    assert_eq!(snap.island_total("archaea"), expected);
                }
            })
        };
        fs::write(dir.path().join("OrgB_[SEQ2]_MGE.out"), TWO_ISLANDS).expect("write");
        cache.refresh(&domains);
        reader.join().expect("reader thread");
    }
}
