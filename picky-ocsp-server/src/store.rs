use picky_ocsp::CertStatus;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: CertStatus,
    /// Time of the last status change
    pub updated_at: SystemTime,
}

/// Status of every certificate the authority was told about, keyed by decimal serial number.
///
/// Serials never set are `Unknown`. Entries are never removed.
#[derive(Debug, Default)]
pub struct StatusStore {
    entries: RwLock<HashMap<String, StatusEntry>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    // poisoned locks are recovered: entries are always replaced whole
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, StatusEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, StatusEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, serial: &str, status: CertStatus) {
        let entry = StatusEntry {
            status,
            updated_at: SystemTime::now(),
        };

        let previous = self.write().insert(serial.to_owned(), entry);
        if let Some(previous) = previous {
            log::debug!("status of {} updated from {} to {}", serial, previous.status, status);
        }
    }

    pub fn get(&self, serial: &str) -> CertStatus {
        self.entry(serial).map(|entry| entry.status).unwrap_or_default()
    }

    pub fn entry(&self, serial: &str) -> Option<StatusEntry> {
        self.read().get(serial).copied()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn missing_serial_is_unknown() {
        let store = StatusStore::new();
        assert_eq!(store.get("12345"), CertStatus::Unknown);
        assert!(store.entry("12345").is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn set_then_get() {
        let store = StatusStore::new();
        for status in [CertStatus::Good, CertStatus::Revoked, CertStatus::Unknown] {
            store.set("12345", status);
            assert_eq!(store.get("12345"), status);
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("54321"), CertStatus::Unknown);
    }

    #[test]
    fn last_write_wins() {
        let store = StatusStore::new();
        store.set("12345", CertStatus::Good);
        let first = store.entry("12345").unwrap();

        store.set("12345", CertStatus::Revoked);
        let second = store.entry("12345").unwrap();

        assert_eq!(second.status, CertStatus::Revoked);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn overwrite_releases_lock() {
        let store = StatusStore::new();
        store.set("12345", CertStatus::Good);
        store.set("12345", CertStatus::Revoked);

        assert!(store.entries.try_write().is_ok());
        assert_eq!(store.get("12345"), CertStatus::Revoked);
    }

    #[test]
    fn serials_are_independent() {
        let store = StatusStore::new();
        store.set("1", CertStatus::Revoked);
        store.set("2", CertStatus::Good);
        assert_eq!(store.get("1"), CertStatus::Revoked);
        assert_eq!(store.get("2"), CertStatus::Good);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn concurrent_access() {
        let store = Arc::new(StatusStore::new());

        let writers = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..100 {
                        let serial = format!("{}", i * 100 + j);
                        store.set(&serial, CertStatus::Revoked);
                        // a completed set is visible to the next get
                        assert_eq!(store.get(&serial), CertStatus::Revoked);
                        store.set("shared", CertStatus::Good);
                        let _ = store.get("shared");
                    }
                })
            })
            .collect::<Vec<_>>();

        for writer in writers {
            writer.join().expect("writer panicked");
        }

        assert_eq!(store.len(), 801);
        assert_eq!(store.get("shared"), CertStatus::Good);
        assert_eq!(store.get("799"), CertStatus::Revoked);
    }
}
