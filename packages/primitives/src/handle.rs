use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};

/// Opaque reference to an active transfer inside the transfer engine.
///
/// Only the engine that issued a handle can interpret it. A handle can
/// become invalid at any time, for example when the engine drops the
/// transfer on its own.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Display, Constructor)]
#[display("#{_0}")]
pub struct EngineHandle(pub u64);
