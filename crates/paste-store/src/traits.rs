use paste_types::FullId;

use crate::error::StoreResult;

/// Key-value persistence underneath a [`BlobStore`](crate::BlobStore).
///
/// All implementations must satisfy these invariants:
/// - A key is written at most once. There is no update or delete.
/// - `write_if_absent` is atomic per key: a reader never observes a partial
///   value, and concurrent writers of the same key produce one physical write.
/// - The backend never interprets values. Keys are trusted to be the digest
///   of their value; the [`BlobStore`](crate::BlobStore) upholds that.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobBackend: Send + Sync {
    /// Check whether a value is stored under `id`.
    fn exists(&self, id: &FullId) -> StoreResult<bool>;

    /// Store `data` under `id` unless something is already there.
    ///
    /// Returns `true` if this call performed the write, `false` if the key
    /// was already present (including when a concurrent writer won the race).
    fn write_if_absent(&self, id: &FullId, data: &[u8]) -> StoreResult<bool>;

    /// Read the value stored under `id`.
    ///
    /// Returns `Ok(None)` if nothing is stored there.
    fn read(&self, id: &FullId) -> StoreResult<Option<Vec<u8>>>;

    /// List every stored key. Order is unspecified.
    fn enumerate_keys(&self) -> StoreResult<Vec<FullId>>;
}

impl<B: BlobBackend + ?Sized> BlobBackend for Box<B> {
    fn exists(&self, id: &FullId) -> StoreResult<bool> {
        (**self).exists(id)
    }

    fn write_if_absent(&self, id: &FullId, data: &[u8]) -> StoreResult<bool> {
        (**self).write_if_absent(id, data)
    }

    fn read(&self, id: &FullId) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(id)
    }

    fn enumerate_keys(&self) -> StoreResult<Vec<FullId>> {
        (**self).enumerate_keys()
    }
}
