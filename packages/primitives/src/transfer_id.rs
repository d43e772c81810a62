//! Transfer identifier.
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier of a transfer.
///
/// Identifiers are generated once, when the transfer is created, and they are
/// never reused, not even after the transfer has been deleted. New
/// identifiers are random (UUID v4) so reuse is not possible in practice.
#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
#[serde(transparent)]
pub struct TransferId(String);

impl TransferId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors parsing a [`TransferId`] from a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTransferIdError {
    #[error("transfer id is empty, {location}")]
    Empty { location: &'static Location<'static> },

    #[error("transfer id {value:?} contains whitespace, {location}")]
    Whitespace {
        value: String,
        location: &'static Location<'static>,
    },
}

impl FromStr for TransferId {
    type Err = ParseTransferIdError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(ParseTransferIdError::Empty {
                location: Location::caller(),
            });
        }

        if value.chars().any(char::is_whitespace) {
            return Err(ParseTransferIdError::Whitespace {
                value: value.to_owned(),
                location: Location::caller(),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use super::{ParseTransferIdError, TransferId};

    #[test]
    fn generated_ids_should_not_repeat() {
        let ids: HashSet<TransferId> = (0..1000).map(|_| TransferId::generate()).collect();

        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn it_should_be_parsed_back_from_its_string_form() {
        let id = TransferId::generate();

        assert_eq!(TransferId::from_str(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn it_should_reject_empty_and_blank_values() {
        assert!(matches!(TransferId::from_str(""), Err(ParseTransferIdError::Empty { .. })));
        assert!(matches!(
            TransferId::from_str("a b"),
            Err(ParseTransferIdError::Whitespace { .. })
        ));
    }

    #[test]
    fn it_should_serialize_as_a_plain_string() {
        let id = TransferId::from_str("abc").unwrap();

        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
