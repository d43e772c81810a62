//! `.torrent` descriptors.
//!
//! A descriptor is a bencoded dictionary. Only the fields the manager needs
//! are decoded, everything else is ignored:
//!
//! ```text
//! d
//!   8:announce       <tracker url>            (optional)
//!   13:announce-list <list of url tiers>      (optional)
//!   4:info d
//!     4:name         <name>
//!     12:piece length <bytes per piece>
//!     6:pieces       <20 byte SHA-1 per piece>
//!     6:length       <bytes>                  (single file)
//!     5:files        l d 6:length <bytes> 4:path l <components> e e ... e  (multi file)
//!     7:private      <0 or 1>                 (optional)
//!   e
//! e
//! ```
use std::sync::Arc;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use torrust_transfer_manager_located_error::{DynError, LocatedError};

const PIECE_HASH_LEN: usize = 20;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Metainfo {
    pub info: Info,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announce: Option<String>,
    #[serde(default, rename = "announce-list", skip_serializing_if = "Option::is_none")]
    pub announce_list: Option<Vec<Vec<String>>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Info {
    pub name: String,
    #[serde(rename = "piece length")]
    pub piece_length: i64,
    #[serde(with = "serde_bytes")]
    pub pieces: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<File>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<i64>,
}

/// One file of a multi-file descriptor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct File {
    pub length: i64,
    pub path: Vec<String>,
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum ParseError {
    #[error("the descriptor is not a valid bencoded dictionary: {source}")]
    Bencode {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("the descriptor name is empty")]
    EmptyName,

    #[error("the descriptor must contain exactly one of `length` or `files`")]
    AmbiguousLayout,

    #[error("the descriptor contains a negative length")]
    NegativeLength,

    #[error("the piece length must be positive, got {piece_length}")]
    InvalidPieceLength { piece_length: i64 },

    #[error("the `pieces` field is {len} bytes long, which is not a multiple of 20")]
    InvalidPieces { len: usize },

    #[error("the file path {path:?} is not a plain relative path")]
    UnsafePath { path: Vec<String> },

    #[error("the total payload size does not fit in 63 bits")]
    SizeOverflow,
}

impl From<serde_bencode::Error> for ParseError {
    #[track_caller]
    fn from(err: serde_bencode::Error) -> Self {
        ParseError::Bencode {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

impl Metainfo {
    /// It decodes and validates a descriptor.
    ///
    /// # Errors
    ///
    /// Will return a [`ParseError`] if the bytes are not bencode, there is no
    /// `info` dictionary, or the `info` dictionary is inconsistent.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ParseError> {
        let metainfo: Metainfo = serde_bencode::from_bytes(raw)?;

        metainfo.info.validate()?;

        Ok(metainfo)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Total payload size in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files().iter().fold(0, |total, (_, length)| total.saturating_add(*length))
    }

    /// The payload files, relative to the save root, with their sizes.
    ///
    /// A single-file payload is stored as `<name>`, the files of a multi-file
    /// payload as `<name>/<path..>`.
    #[must_use]
    pub fn files(&self) -> Vec<(Utf8PathBuf, u64)> {
        let root = Utf8PathBuf::from(&self.info.name);

        match (&self.info.length, &self.info.files) {
            (Some(length), _) => vec![(root, to_size(*length))],
            (None, Some(files)) => files
                .iter()
                .map(|file| {
                    let mut path = root.clone();
                    path.extend(&file.path);
                    (path, to_size(file.length))
                })
                .collect(),
            (None, None) => vec![],
        }
    }

    /// The `info` dictionary, re-encoded. Two descriptors describe the same
    /// content when these bytes are equal.
    ///
    /// # Errors
    ///
    /// Will return a [`ParseError`] if the dictionary can not be encoded.
    pub fn info_bytes(&self) -> Result<Vec<u8>, ParseError> {
        Ok(serde_bencode::to_bytes(&self.info)?)
    }
}

impl Info {
    fn validate(&self) -> Result<(), ParseError> {
        if self.name.trim().is_empty() {
            return Err(ParseError::EmptyName);
        }

        if self.piece_length <= 0 {
            return Err(ParseError::InvalidPieceLength {
                piece_length: self.piece_length,
            });
        }

        if self.pieces.len() % PIECE_HASH_LEN != 0 {
            return Err(ParseError::InvalidPieces { len: self.pieces.len() });
        }

        match (&self.length, &self.files) {
            (Some(length), None) => {
                if *length < 0 {
                    return Err(ParseError::NegativeLength);
                }
            }
            (None, Some(files)) if !files.is_empty() => {
                let mut total: i64 = 0;

                for file in files {
                    if file.length < 0 {
                        return Err(ParseError::NegativeLength);
                    }
                    if !is_plain_relative(&file.path) {
                        return Err(ParseError::UnsafePath { path: file.path.clone() });
                    }
                    total = total.checked_add(file.length).ok_or(ParseError::SizeOverflow)?;
                }
            }
            _ => return Err(ParseError::AmbiguousLayout),
        }

        if !is_plain_relative(&[self.name.clone()]) {
            return Err(ParseError::UnsafePath {
                path: vec![self.name.clone()],
            });
        }

        Ok(())
    }
}

fn is_plain_relative(components: &[String]) -> bool {
    !components.is_empty()
        && components
            .iter()
            .all(|c| !c.is_empty() && c != "." && c != ".." && !c.contains(['/', '\\']))
}

fn to_size(length: i64) -> u64 {
    u64::try_from(length).unwrap_or_default()
}

/// Builders for descriptors used in tests.
pub mod fixture {
    use super::{File, Info, Metainfo, PIECE_HASH_LEN};

    const PIECE_LENGTH: i64 = 16_384;
    const PIECE_LENGTH_BYTES: u64 = 16_384;
    /// Huge payloads get a truncated piece list. Nothing checks it against the size.
    const MAX_PIECES: u64 = 4_096;

    /// It builds valid descriptors.
    ///
    /// ```rust
    /// use torrust_transfer_manager::core::engine::metainfo::fixture::MetainfoBuilder;
    /// use torrust_transfer_manager::core::engine::metainfo::Metainfo;
    ///
    /// let raw = MetainfoBuilder::single_file("ubuntu.iso", 1024).to_bytes();
    ///
    /// assert_eq!(Metainfo::from_bytes(&raw).unwrap().total_size(), 1024);
    /// ```
    #[derive(Clone, Debug)]
    pub struct MetainfoBuilder {
        name: String,
        length: Option<i64>,
        files: Option<Vec<File>>,
        announce: Option<String>,
    }

    impl MetainfoBuilder {
        #[must_use]
        pub fn single_file(name: &str, length: i64) -> Self {
            Self {
                name: name.to_owned(),
                length: Some(length),
                files: None,
                announce: None,
            }
        }

        /// Paths use `/` as separator: `("docs/readme.txt", 12)`.
        #[must_use]
        pub fn multi_file(name: &str, files: &[(&str, i64)]) -> Self {
            Self {
                name: name.to_owned(),
                length: None,
                files: Some(
                    files
                        .iter()
                        .map(|(path, length)| File {
                            length: *length,
                            path: path.split('/').map(ToOwned::to_owned).collect(),
                        })
                        .collect(),
                ),
                announce: None,
            }
        }

        #[must_use]
        pub fn with_announce(mut self, url: &str) -> Self {
            self.announce = Some(url.to_owned());
            self
        }

        #[must_use]
        pub fn build(&self) -> Metainfo {
            let total: i64 = self.length.unwrap_or_else(|| {
                self.files
                    .as_ref()
                    .map(|files| files.iter().fold(0, |total: i64, f| total.saturating_add(f.length)))
                    .unwrap_or_default()
            });

            let num_pieces = u64::try_from(total)
                .unwrap_or_default()
                .div_ceil(PIECE_LENGTH_BYTES)
                .clamp(1, MAX_PIECES);
            let num_pieces = usize::try_from(num_pieces).unwrap_or(1);

            Metainfo {
                info: Info {
                    name: self.name.clone(),
                    piece_length: PIECE_LENGTH,
                    pieces: vec![0xab; num_pieces * PIECE_HASH_LEN],
                    length: self.length,
                    files: self.files.clone(),
                    private: None,
                },
                announce: self.announce.clone(),
                announce_list: None,
            }
        }

        /// # Panics
        ///
        /// Will panic if the descriptor can not be encoded.
        #[must_use]
        pub fn to_bytes(&self) -> Vec<u8> {
            serde_bencode::to_bytes(&self.build()).expect("a built descriptor should be encodable")
        }
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::fixture::MetainfoBuilder;
    use super::{Metainfo, ParseError};

    #[test]
    fn it_should_parse_a_single_file_descriptor() {
        let raw = MetainfoBuilder::single_file("ubuntu.iso", 40_000)
            .with_announce("udp://tracker.example.com:6969")
            .to_bytes();

        let metainfo = Metainfo::from_bytes(&raw).unwrap();

        assert_eq!(metainfo.name(), "ubuntu.iso");
        assert_eq!(metainfo.total_size(), 40_000);
        assert_eq!(metainfo.announce.as_deref(), Some("udp://tracker.example.com:6969"));
        assert_eq!(metainfo.files(), vec![(Utf8PathBuf::from("ubuntu.iso"), 40_000)]);
    }

    #[test]
    fn it_should_parse_a_multi_file_descriptor() {
        let raw = MetainfoBuilder::multi_file("album", &[("cd1/track01.flac", 300), ("cover.jpg", 20)]).to_bytes();

        let metainfo = Metainfo::from_bytes(&raw).unwrap();

        assert_eq!(metainfo.total_size(), 320);
        assert_eq!(
            metainfo.files(),
            vec![
                (Utf8PathBuf::from("album/cd1/track01.flac"), 300),
                (Utf8PathBuf::from("album/cover.jpg"), 20)
            ]
        );
    }

    #[test]
    fn it_should_ignore_unknown_fields() {
        let raw = b"d7:comment4:test4:infod6:lengthi5e4:name1:a12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";

        let metainfo = Metainfo::from_bytes(raw).unwrap();

        assert_eq!(metainfo.name(), "a");
        assert_eq!(metainfo.total_size(), 5);
    }

    #[test]
    fn it_should_reject_bytes_that_are_not_bencode() {
        assert!(matches!(
            Metainfo::from_bytes(b"this is not a torrent"),
            Err(ParseError::Bencode { .. })
        ));
    }

    #[test]
    fn it_should_reject_a_descriptor_without_info() {
        assert!(matches!(
            Metainfo::from_bytes(b"d8:announce3:urle"),
            Err(ParseError::Bencode { .. })
        ));
    }

    #[test]
    fn it_should_reject_an_empty_name() {
        let raw = MetainfoBuilder::single_file("", 10).to_bytes();

        assert!(matches!(Metainfo::from_bytes(&raw), Err(ParseError::EmptyName)));
    }

    #[test]
    fn it_should_reject_a_descriptor_with_both_length_and_files() {
        let mut metainfo = MetainfoBuilder::single_file("a", 10).build();
        metainfo.info.files = MetainfoBuilder::multi_file("a", &[("b", 1)]).build().info.files;
        let raw = serde_bencode::to_bytes(&metainfo).unwrap();

        assert!(matches!(Metainfo::from_bytes(&raw), Err(ParseError::AmbiguousLayout)));
    }

    #[test]
    fn it_should_reject_a_descriptor_with_neither_length_nor_files() {
        let mut metainfo = MetainfoBuilder::single_file("a", 10).build();
        metainfo.info.length = None;
        let raw = serde_bencode::to_bytes(&metainfo).unwrap();

        assert!(matches!(Metainfo::from_bytes(&raw), Err(ParseError::AmbiguousLayout)));
    }

    #[test]
    fn it_should_reject_pieces_that_are_not_a_multiple_of_20_bytes() {
        let mut metainfo = MetainfoBuilder::single_file("a", 10).build();
        metainfo.info.pieces.pop();
        let raw = serde_bencode::to_bytes(&metainfo).unwrap();

        assert!(matches!(Metainfo::from_bytes(&raw), Err(ParseError::InvalidPieces { len: 19 })));
    }

    #[test]
    fn it_should_reject_paths_escaping_the_save_root() {
        let raw = MetainfoBuilder::multi_file("a", &[("../../etc/passwd", 1)]).to_bytes();

        assert!(matches!(Metainfo::from_bytes(&raw), Err(ParseError::UnsafePath { .. })));
    }

    #[test]
    fn it_should_reject_files_whose_total_size_overflows() {
        let raw = MetainfoBuilder::multi_file("a", &[("x", i64::MAX), ("y", i64::MAX), ("z", i64::MAX)]).to_bytes();

        assert!(matches!(Metainfo::from_bytes(&raw), Err(ParseError::SizeOverflow)));
    }

    #[test]
    fn it_should_accept_files_that_add_up_to_the_largest_size() {
        let raw = MetainfoBuilder::multi_file("a", &[("x", i64::MAX - 1), ("y", 1)]).to_bytes();

        assert_eq!(Metainfo::from_bytes(&raw).unwrap().total_size(), i64::MAX.unsigned_abs());
    }

    #[test]
    fn two_descriptors_for_the_same_content_should_have_the_same_info_bytes() {
        let first = MetainfoBuilder::single_file("a", 10).build();
        let same_content = MetainfoBuilder::single_file("a", 10).with_announce("http://other").build();
        let other_content = MetainfoBuilder::single_file("b", 10).build();

        assert_eq!(first.info_bytes().unwrap(), same_content.info_bytes().unwrap());
        assert_ne!(first.info_bytes().unwrap(), other_content.info_bytes().unwrap());
    }
}
