use torrust_transfer_manager_primitives::{EngineHandle, TransferSnapshot};

pub mod single;

pub trait Entry {
    /// The engine handle the transfer is attached to.
    fn handle(&self) -> EngineHandle;

    /// The snapshot derived in the last tick, if any tick recorded one since
    /// the transfer was registered.
    fn last_snapshot(&self) -> Option<&TransferSnapshot>;

    /// It returns the last known `(download, upload)` rates in bytes per
    /// second. Zero before the first recorded snapshot.
    fn rates(&self) -> (u64, u64);

    /// It replaces the last snapshot and returns the previous one.
    fn record(&mut self, snapshot: TransferSnapshot) -> Option<TransferSnapshot>;
}

/// A registered transfer: the engine handle plus the last derived snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Transfer {
    pub(crate) handle: EngineHandle,
    pub(crate) last: Option<TransferSnapshot>,
}

impl Transfer {
    /// A freshly registered transfer. It has no snapshot yet.
    #[must_use]
    pub fn new(handle: EngineHandle) -> Self {
        Self { handle, last: None }
    }
}
