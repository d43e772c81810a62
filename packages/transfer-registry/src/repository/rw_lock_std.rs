use std::collections::BTreeMap;

use torrust_transfer_manager_primitives::{EngineHandle, TransferId, TransferSnapshot};

use super::Repository;
use crate::entry::Entry;
use crate::{EntrySingle, TransfersRwLockStd};

/// A registry guarded by a [`std::sync::RwLock`]: many concurrent readers,
/// mutations mutually exclusive.
#[derive(Debug)]
pub struct RwLockStd<T> {
    pub(crate) transfers: std::sync::RwLock<BTreeMap<TransferId, T>>,
}

// Derived `Default` would require `T: Default`, and entries only exist with a handle.
impl<T> Default for RwLockStd<T> {
    fn default() -> Self {
        Self {
            transfers: std::sync::RwLock::default(),
        }
    }
}

impl TransfersRwLockStd {
    fn get_transfers<'a>(&'a self) -> std::sync::RwLockReadGuard<'a, BTreeMap<TransferId, EntrySingle>>
    where
        BTreeMap<TransferId, EntrySingle>: 'a,
    {
        self.transfers.read().expect("it should get the read lock")
    }

    fn get_transfers_mut<'a>(&'a self) -> std::sync::RwLockWriteGuard<'a, BTreeMap<TransferId, EntrySingle>>
    where
        BTreeMap<TransferId, EntrySingle>: 'a,
    {
        self.transfers.write().expect("it should get the write lock")
    }
}

impl Repository<EntrySingle> for TransfersRwLockStd
where
    EntrySingle: Entry,
{
    fn register(&self, id: &TransferId, handle: EngineHandle) -> Option<EntrySingle> {
        let mut db = self.get_transfers_mut();
        db.insert(id.clone(), EntrySingle::new(handle))
    }

    fn unregister(&self, id: &TransferId) -> Option<EntrySingle> {
        let mut db = self.get_transfers_mut();
        db.remove(id)
    }

    fn get(&self, id: &TransferId) -> Option<EntrySingle> {
        let db = self.get_transfers();
        db.get(id).cloned()
    }

    fn handle(&self, id: &TransferId) -> Option<EngineHandle> {
        let db = self.get_transfers();
        db.get(id).map(Entry::handle)
    }

    fn list(&self) -> Vec<(TransferId, EntrySingle)> {
        let db = self.get_transfers();
        db.iter().map(|(id, entry)| (id.clone(), entry.clone())).collect()
    }

    fn record(&self, id: &TransferId, handle: EngineHandle, snapshot: TransferSnapshot) -> bool {
        let mut db = self.get_transfers_mut();

        match db.get_mut(id) {
            Some(entry) if entry.handle() == handle => {
                entry.record(snapshot);
                true
            }
            _ => false,
        }
    }

    fn live_rates(&self) -> (u64, u64) {
        self.get_transfers()
            .values()
            .map(Entry::rates)
            .fold((0, 0), |(download, upload), (d, u)| {
                (download.saturating_add(d), upload.saturating_add(u))
            })
    }

    fn len(&self) -> usize {
        self.get_transfers().len()
    }
}
