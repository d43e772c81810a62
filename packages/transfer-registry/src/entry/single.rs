use torrust_transfer_manager_primitives::{EngineHandle, TransferSnapshot};

use super::Entry;
use crate::EntrySingle;

impl Entry for EntrySingle {
    fn handle(&self) -> EngineHandle {
        self.handle
    }

    fn last_snapshot(&self) -> Option<&TransferSnapshot> {
        self.last.as_ref()
    }

    fn rates(&self) -> (u64, u64) {
        self.last
            .as_ref()
            .map_or((0, 0), |snapshot| (snapshot.download_rate, snapshot.upload_rate))
    }

    fn record(&mut self, snapshot: TransferSnapshot) -> Option<TransferSnapshot> {
        self.last.replace(snapshot)
    }
}
