use serde::{Deserialize, Serialize};

/// The `[logging]` section.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct Logging {
    /// Least severe level that is still written. `info` when missing.
    #[serde(default = "Logging::default_threshold")]
    pub threshold: Threshold,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
        }
    }
}

impl Logging {
    fn default_threshold() -> Threshold {
        Threshold::Info
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Clone, Copy, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// Nothing is logged.
    #[display("off")]
    Off,
    /// Backoffs, engine errors and failed requests.
    #[display("error")]
    Error,
    /// Pruned handles and ignored engine failures.
    #[display("warn")]
    Warn,
    /// Transfer lifecycle: created, completed, deleted.
    #[display("info")]
    Info,
    /// One line per supervisor tick and per request.
    #[display("debug")]
    Debug,
    #[display("trace")]
    Trace,
}
