use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use paste_types::FullId;

use crate::error::StoreResult;
use crate::traits::BlobBackend;

/// In-memory, HashMap-based backend.
///
/// Intended for tests and embedding. Values are held behind a `RwLock` and
/// cloned on read.
pub struct InMemoryBackend {
    blobs: RwLock<HashMap<FullId, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored values.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobBackend for InMemoryBackend {
    fn exists(&self, id: &FullId) -> StoreResult<bool> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }

    fn write_if_absent(&self, id: &FullId, data: &[u8]) -> StoreResult<bool> {
        let mut map = self.blobs.write().expect("lock poisoned");
        match map.entry(*id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(data.to_vec());
                Ok(true)
            }
        }
    }

    fn read(&self, id: &FullId) -> StoreResult<Option<Vec<u8>>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn enumerate_keys(&self) -> StoreResult<Vec<FullId>> {
        let map = self.blobs.read().expect("lock poisoned");
        Ok(map.keys().copied().collect())
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryBackend")
            .field("blob_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> FullId {
        FullId::from_digest([byte; 32])
    }

    #[test]
    fn write_and_read() {
        let backend = InMemoryBackend::new();
        assert!(backend.write_if_absent(&id(1), b"hello world").unwrap());
        assert_eq!(backend.read(&id(1)).unwrap().unwrap(), b"hello world");
    }

    #[test]
    fn second_write_is_skipped() {
        let backend = InMemoryBackend::new();
        assert!(backend.write_if_absent(&id(1), b"first").unwrap());
        assert!(!backend.write_if_absent(&id(1), b"second").unwrap());
        assert_eq!(backend.read(&id(1)).unwrap().unwrap(), b"first");
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn read_missing_returns_none() {
        let backend = InMemoryBackend::new();
        assert!(backend.read(&id(9)).unwrap().is_none());
        assert!(!backend.exists(&id(9)).unwrap());
    }

    #[test]
    fn empty_value_is_distinct_from_absent() {
        let backend = InMemoryBackend::new();
        backend.write_if_absent(&id(2), b"").unwrap();
        assert!(backend.exists(&id(2)).unwrap());
        assert_eq!(backend.read(&id(2)).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn enumerate_returns_all_keys() {
        let backend = InMemoryBackend::new();
        for b in 1..=3 {
            backend.write_if_absent(&id(b), &[b]).unwrap();
        }
        let mut keys = backend.enumerate_keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn len_is_empty_and_total_bytes() {
        let backend = InMemoryBackend::default();
        assert!(backend.is_empty());
        backend.write_if_absent(&id(1), b"12345").unwrap();
        backend.write_if_absent(&id(2), b"123456789").unwrap();
        assert!(!backend.is_empty());
        assert_eq!(backend.total_bytes(), 14);
    }

    #[test]
    fn concurrent_writers_store_once() {
        use std::sync::Arc;
        use std::thread;

        let backend = Arc::new(InMemoryBackend::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let backend = Arc::clone(&backend);
                thread::spawn(move || backend.write_if_absent(&id(7), b"shared").unwrap())
            })
            .collect();

        let wrote: usize = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic") as usize)
            .sum();
        assert_eq!(wrote, 1);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn debug_format() {
        let backend = InMemoryBackend::new();
        backend.write_if_absent(&id(1), b"x").unwrap();
        let debug = format!("{backend:?}");
        assert!(debug.contains("InMemoryBackend"));
        assert!(debug.contains("blob_count"));
    }
}
