use torrust_transfer_manager_primitives::{TransferSnapshot, TransferStatus};

/// A snapshot of a transfer that is downloading at the given rates.
#[must_use]
pub fn downloading(progress: f64, download_rate: u64, upload_rate: u64) -> TransferSnapshot {
    TransferSnapshot {
        progress,
        download_rate,
        upload_rate,
        status: TransferStatus::Downloading,
        ..Default::default()
    }
}
