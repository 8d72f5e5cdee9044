//! In-memory record store.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use codemerge_shared::{FileId, FileRecord};

use crate::RecordStore;

/// Concurrency-safe in-memory mapping from [`FileId`] to [`FileRecord`].
///
/// One `RwLock` guards one `HashMap` — lookups run concurrently with each
/// other, while insert/delete/sweep take the write lock. A record is
/// always either fully present or fully absent to readers; no entry is
/// ever observed half-written.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<FileId, FileRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, id: FileId, record: FileRecord) {
        self.records.write().insert(id, record);
    }

    fn get(&self, id: &FileId) -> Option<FileRecord> {
        self.records.read().get(id).cloned()
    }

    fn delete(&self, id: &FileId) {
        self.records.write().remove(id);
    }

    fn sweep(&self, max_age: Duration) -> usize {
        let max_age =
            chrono::Duration::from_std(max_age).unwrap_or_else(|_| chrono::Duration::MAX);
        let now = Utc::now();

        let mut records = self.records.write();
        let before = records.len();
        records.retain(|_, record| now - record.uploaded_at <= max_age);
        let removed = before - records.len();

        if removed > 0 {
            debug!(removed, remaining = records.len(), "expired records swept");
        }
        removed
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn record_aged(filename: &str, age: Duration) -> FileRecord {
        let content = format!("contents of {filename}");
        FileRecord {
            filename: filename.into(),
            size: content.len(),
            content_hash: "0".repeat(64),
            content,
            uploaded_at: Utc::now() - chrono::Duration::from_std(age).unwrap(),
        }
    }

    fn record(filename: &str) -> FileRecord {
        record_aged(filename, Duration::ZERO)
    }

    #[test]
    fn insert_then_get_observes_value() {
        let store = MemoryStore::new();
        let id = FileId::new();
        store.insert(id.clone(), record("a.txt"));

        let found = store.get(&id).expect("record present");
        assert_eq!(found.filename, "a.txt");
        assert_eq!(found.content, "contents of a.txt");
    }

    #[test]
    fn get_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get(&FileId::new()).is_none());
    }

    #[test]
    fn insert_overwrites_last_writer_wins() {
        let store = MemoryStore::new();
        let id = FileId::new();
        store.insert(id.clone(), record("first.txt"));
        store.insert(id.clone(), record("second.txt"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().filename, "second.txt");
    }

    #[test]
    fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = FileId::new();
        store.insert(id.clone(), record("a.txt"));

        store.delete(&id);
        assert!(store.get(&id).is_none());
        // Deleting again is a no-op, not an error.
        store.delete(&id);
        assert!(store.is_empty());
    }

    #[test]
    fn sweep_honors_the_age_boundary() {
        let ttl = Duration::from_secs(600);
        let store = MemoryStore::new();

        let fresh = FileId::new();
        let on_boundary = FileId::new();
        let expired = FileId::new();
        store.insert(fresh.clone(), record_aged("fresh.txt", Duration::from_secs(1)));
        store.insert(
            on_boundary.clone(),
            record_aged("boundary.txt", ttl - Duration::from_secs(1)),
        );
        store.insert(
            expired.clone(),
            record_aged("expired.txt", ttl + Duration::from_secs(1)),
        );

        let removed = store.sweep(ttl);

        assert_eq!(removed, 1);
        assert!(store.get(&fresh).is_some());
        assert!(store.get(&on_boundary).is_some(), "age ≤ ttl must survive");
        assert!(store.get(&expired).is_none(), "age > ttl must be evicted");
    }

    #[test]
    fn sweep_of_empty_store_is_harmless() {
        let store = MemoryStore::new();
        assert_eq!(store.sweep(Duration::from_secs(1)), 0);
    }

    #[test]
    fn concurrent_inserts_lookups_and_sweeps() {
        let ttl = Duration::from_secs(60);
        let store = Arc::new(MemoryStore::new());

        // Seed some already-expired records for the sweeper to chew on.
        for i in 0u64..50 {
            store.insert(
                FileId::new(),
                record_aged(&format!("old-{i}.txt"), ttl + Duration::from_secs(i + 1)),
            );
        }

        std::thread::scope(|s| {
            // Writers: insert fresh records, immediately look them up.
            for t in 0..4 {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    for i in 0..100 {
                        let id = FileId::new();
                        store.insert(id.clone(), record(&format!("w{t}-{i}.txt")));
                        // Same-task read-your-write must always hold.
                        assert!(store.get(&id).is_some());
                    }
                });
            }
            // Sweeper: races the writers at per-call granularity.
            let sweeper_store = Arc::clone(&store);
            s.spawn(move || {
                for _ in 0..20 {
                    sweeper_store.sweep(ttl);
                    std::thread::yield_now();
                }
            });
        });

        // Every expired record is gone, every fresh record survived.
        store.sweep(ttl);
        assert_eq!(store.len(), 400);
    }
}
