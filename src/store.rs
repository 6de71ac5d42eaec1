//! The owning case store.

use std::sync::Arc;

use crate::case::Case;
use crate::storage::{self, StorageBackend};

/// Owner of the authoritative in-memory case collection.
///
/// Cases are held in insertion order; sorting happens only in the derived
/// views. After [`CaseStore::initialize`] has run, every mutation writes
/// the whole collection through to storage. A failed write-through is
/// logged and the in-memory state stays authoritative; the durable copy
/// catches up on the next successful save.
pub struct CaseStore {
    cases: Vec<Case>,
    backend: Arc<dyn StorageBackend>,
    settled: bool,
}

impl CaseStore {
    /// Construct an unsettled store; mutations persist only after
    /// [`CaseStore::initialize`].
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            cases: Vec::new(),
            backend,
            settled: false,
        }
    }

    /// Load the durable collection into memory and enable write-through.
    ///
    /// The load itself never saves, so an empty initial state cannot
    /// clobber existing durable data.
    pub fn initialize(&mut self) {
        self.cases = storage::load_cases(self.backend.as_ref());
        self.settled = true;
    }

    /// Snapshot of the collection, in insertion order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Append a case to the end of the collection.
    pub fn add(&mut self, case: Case) {
        self.cases.push(case);
        self.write_through();
    }

    /// Replace the case with `id` by `updater(&existing)`.
    ///
    /// Unknown IDs are a silent no-op by policy, not an error.
    pub fn replace(&mut self, id: i64, updater: impl FnOnce(&Case) -> Case) -> Option<Case> {
        let index = self.cases.iter().position(|case| case.id == id)?;
        let updated = updater(&self.cases[index]);
        self.cases[index] = updated.clone();
        self.write_through();
        Some(updated)
    }

    /// Remove the case with `id`; `false` when no such case exists.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.cases.len();
        self.cases.retain(|case| case.id != id);
        if self.cases.len() == before {
            return false;
        }
        self.write_through();
        true
    }

    fn write_through(&self) {
        if !self.settled {
            return;
        }
        if let Err(e) = storage::save_cases(self.backend.as_ref(), &self.cases) {
            tracing::warn!("Failed to persist case collection: {}", e);
        }
    }
}
