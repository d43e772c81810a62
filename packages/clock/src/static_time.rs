//! Wall-clock time captured when the manager boots.
use std::time::SystemTime;

lazy_static! {
    /// Set on first access. `bootstrap::app` touches it before any job starts.
    pub static ref TIME_AT_APP_START: SystemTime = SystemTime::now();
}
