use torrust_transfer_manager_primitives::{EngineHandle, TransferId, TransferSnapshot};

pub mod rw_lock_std;

/// The operations of a transfer registry.
///
/// Every method takes the lock only for its own duration. Callers get owned
/// copies, so no lock is held while they work with the result.
pub trait Repository<T>: Default + 'static {
    /// It attaches `handle` to `id`, replacing any previous entry. The new
    /// entry has no snapshot. It returns the replaced entry.
    fn register(&self, id: &TransferId, handle: EngineHandle) -> Option<T>;

    /// It removes the entry and returns it, if there was one.
    fn unregister(&self, id: &TransferId) -> Option<T>;

    fn get(&self, id: &TransferId) -> Option<T>;

    /// It returns the engine handle registered for `id`.
    fn handle(&self, id: &TransferId) -> Option<EngineHandle>;

    /// A point-in-time copy of all the entries ordered by id.
    fn list(&self) -> Vec<(TransferId, T)>;

    /// It stores `snapshot` as the last snapshot of `id`, but only while `id`
    /// is still registered with `handle`. It returns `false` when the entry
    /// was removed or re-registered in the meantime.
    fn record(&self, id: &TransferId, handle: EngineHandle, snapshot: TransferSnapshot) -> bool;

    /// Sum of the last recorded `(download, upload)` rates.
    fn live_rates(&self) -> (u64, u64);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
