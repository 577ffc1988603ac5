use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::RolePermissionTable;

/// Holder of the live role→permission table.
///
/// Tables are never edited in place: [`PolicyStore::replace`] swaps in a new
/// `Arc` with the next version number. Evaluations that already hold the old
/// `Arc` finish against it.
#[derive(Debug)]
pub struct PolicyStore {
    current: RwLock<Arc<RolePermissionTable>>,
}

impl PolicyStore {
    pub fn new(table: RolePermissionTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    pub fn current(&self) -> Arc<RolePermissionTable> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in `table`, returning the version it was published under.
    pub fn replace(&self, table: RolePermissionTable) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let version = guard.version() + 1;
        *guard = Arc::new(table.with_version(version));
        info!(version, "role permission table replaced");
        version
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new(RolePermissionTable::builtin())
    }
}
