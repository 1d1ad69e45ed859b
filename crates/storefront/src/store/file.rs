//! File-backed store: one file per `(scope, key)` under a root directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyedStore, StoreError, StoreKey, StoreScope};

/// Durable [`KeyedStore`] backed by the filesystem.
///
/// Layout: `<root>/<scope-namespace>/<key>.json`. Writes create the scope
/// directory on demand. Any I/O failure maps to
/// [`StoreError::Unavailable`]; the caller decides how to degrade.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, scope: &StoreScope, key: StoreKey) -> PathBuf {
        self.root
            .join(scope.namespace())
            .join(format!("{}.json", key.as_str()))
    }
}

fn unavailable(err: &std::io::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

impl KeyedStore for FileStore {
    fn get(&self, scope: &StoreScope, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(self.path(scope, key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable(&err)),
        }
    }

    fn set(&self, scope: &StoreScope, key: StoreKey, value: &[u8]) -> Result<(), StoreError> {
        let path = self.path(scope, key);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| unavailable(&e))?;
        }
        std::fs::write(&path, value).map_err(|e| unavailable(&e))
    }

    fn remove(&self, scope: &StoreScope, key: StoreKey) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(scope, key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(unavailable(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::OwnerScope;
    use super::*;

    fn temp_store() -> FileStore {
        let root = std::env::temp_dir().join(format!("walknex-store-{}", uuid::Uuid::new_v4()));
        FileStore::new(root)
    }

    #[test]
    fn test_set_get_remove_round_trip() {
        let store = temp_store();
        let scope = StoreScope::Owner(OwnerScope::User("alice".to_string()));

        assert!(store.get(&scope, StoreKey::Cart).expect("get").is_none());

        store.set(&scope, StoreKey::Cart, b"{}").expect("set");
        assert_eq!(
            store.get(&scope, StoreKey::Cart).expect("get"),
            Some(b"{}".to_vec())
        );

        store.remove(&scope, StoreKey::Cart).expect("remove");
        assert!(store.get(&scope, StoreKey::Cart).expect("get").is_none());

        let _ = std::fs::remove_dir_all(store.root());
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let store = temp_store();
        let scope = StoreScope::Global;
        store
            .set(&scope, StoreKey::ChatConsent, b"true")
            .expect("set");

        // A second handle over the same root sees the value, like a new
        // browser session over the same localStorage.
        let reopened = FileStore::new(store.root());
        assert_eq!(
            reopened.get(&scope, StoreKey::ChatConsent).expect("get"),
            Some(b"true".to_vec())
        );

        let _ = std::fs::remove_dir_all(store.root());
    }
}
