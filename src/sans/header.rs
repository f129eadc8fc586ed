//! States processing the strict directory header.

use thiserror::Error;
use zerocopy::{FromBytes, byteorder::little_endian::U32};

use super::entry::{DirectoryEntry, ENTRY_LEN};

/// Number of bytes in the strict directory header.
pub const HEADER_LEN: usize = 8;

/// A reason the bytes after the magic token are not a strict directory header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryHeaderError {
    /// The file ends before the header does.
    #[error("Directory header is truncated.")]
    Truncated,
    /// Declared directory length is zero.
    #[error("Directory length is zero.")]
    EmptyDirectory,
    /// Declared entry count is zero.
    #[error("Directory has no entries.")]
    NoEntries,
    /// The declared entries would extend past the end of the file.
    #[error("{entries} entries need {needed} bytes, but only {available} remain.")]
    PastEndOfFile {
        entries: u32,
        needed: u64,
        available: usize,
    },
}

/// State token to decode a strict directory header.
#[derive(Debug)]
pub struct DirectoryHeader;

impl DirectoryHeader {
    /// Transition to another state by decoding a directory header.
    ///
    /// `available` is the number of file bytes following the header.
    ///
    /// Returns the declared directory length and entry count, and a successor
    /// state token for the first entry.
    pub fn advance(
        r: [u8; HEADER_LEN],
        available: usize,
    ) -> Result<(u32, u32, DirectoryEntry), DirectoryHeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct RawHeader {
            directory_length: U32,
            entry_count: U32,
        }

        let RawHeader {
            directory_length,
            entry_count,
        } = zerocopy::transmute!(r);

        let (directory_length, entries) = (directory_length.get(), entry_count.get());

        if directory_length == 0 {
            Err(DirectoryHeaderError::EmptyDirectory)?;
        }

        if entries == 0 {
            Err(DirectoryHeaderError::NoEntries)?;
        }

        let needed = u64::from(entries) * ENTRY_LEN as u64;

        if needed > available as u64 {
            Err(DirectoryHeaderError::PastEndOfFile {
                entries,
                needed,
                available,
            })?;
        }

        let successor = DirectoryEntry {
            entries_remaining: entries,
        };

        Ok((directory_length, entries, successor))
    }
}
