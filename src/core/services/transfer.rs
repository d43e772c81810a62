//! Transfer domain services.
//!
//! - [`get_transfer_info`]: one stored transfer, with its staleness.
//! - [`get_transfers`]: all the stored transfers, most recently created first.
use torrust_transfer_manager_clock::clock::Time;
use torrust_transfer_manager_primitives::TransferId;

use crate::core::error::Error;
use crate::core::transfer::TransferRecord;
use crate::core::Manager;
use crate::CurrentClock;

/// A stored transfer as the delivery layer shows it.
#[derive(Debug, PartialEq, Clone)]
pub struct Info {
    pub record: TransferRecord,
    /// The live fields were not refreshed for longer than the configured
    /// number of poll intervals.
    pub stale: bool,
}

fn info(manager: &Manager, record: TransferRecord) -> Info {
    let stale = record.is_stale(CurrentClock::now(), manager.config().core.supervisor.stale_after());

    Info { record, stale }
}

/// # Errors
///
/// Will return `NotFound` if there is no record with that id and
/// `StoreUnavailable` if the store can not be read.
pub fn get_transfer_info(manager: &Manager, id: &TransferId) -> Result<Info, Error> {
    let record = manager.get_transfer(id)?;

    Ok(info(manager, record))
}

/// # Errors
///
/// Will return `StoreUnavailable` if the store can not be read.
pub fn get_transfers(manager: &Manager) -> Result<Vec<Info>, Error> {
    Ok(manager
        .get_transfers()?
        .into_iter()
        .map(|record| info(manager, record))
        .collect())
}
