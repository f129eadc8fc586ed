//! Directory entries and the checks deciding whether one is plausible.

use core::fmt;

use either::Either::{self, Left, Right};
use thiserror::Error;
use zerocopy::{
    FromBytes,
    byteorder::little_endian::{U16, U32},
};

/// Number of bytes in one directory entry on the wire.
pub const ENTRY_LEN: usize = 10;

/// Identifier of the section holding uncompressed lead samples.
pub const LEADS_DATA: u16 = 6;

/// Standard name of a section, for the identifiers defined by the format.
pub fn section_name(id: u16) -> Option<&'static str> {
    Some(match id {
        0 => "Header",
        1 => "Patient",
        2 => "Acquisition",
        3 => "Manufacturer",
        4 => "Measurements",
        5 => "Global diagnosis",
        6 => "Leads data",
        _ => return None,
    })
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct RawEntry {
    id: U16,
    length: U32,
    offset: U32,
}

/// The location of one section within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionEntry {
    pub id: u16,
    pub length: u32,
    pub offset: u32,
}

impl SectionEntry {
    /// Read an entry from its wire layout, without any validation.
    pub fn from_bytes(r: [u8; ENTRY_LEN]) -> Self {
        let RawEntry { id, length, offset } = zerocopy::transmute!(r);

        Self {
            id: id.get(),
            length: length.get(),
            offset: offset.get(),
        }
    }

    /// Offset one past the last byte of the section.
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.length)
    }

    /// Check the identifier, length and offset individually against a file.
    ///
    /// This does not check that the section ends within the file. See
    /// [`Self::fits`].
    pub fn check(&self, bounds: Bounds) -> Result<(), EntryError> {
        let Self { id, length, offset } = *self;

        if !(0 < id && id < bounds.max_id) {
            Err(EntryError::Id(id))?;
        }

        if !(0 < length && length as u64 <= bounds.file_size as u64) {
            Err(EntryError::Length(length))?;
        }

        if offset as u64 >= bounds.file_size as u64 {
            Err(EntryError::Offset(offset))?;
        }

        Ok(())
    }

    /// Whether the whole section lies within the file.
    pub fn fits(&self, bounds: Bounds) -> bool {
        self.end() <= bounds.file_size as u64
    }
}

impl fmt::Display for SectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={:2}  len={:6}  off={:6} (Section {}",
            self.id, self.length, self.offset, self.id
        )?;

        if let Some(name) = section_name(self.id) {
            write!(f, ": {name}")?;
        }

        write!(f, ")")
    }
}

/// The file against which entries are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub file_size: usize,
    /// Exclusive upper bound on identifiers.
    pub max_id: u16,
}

/// An implausible directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Identifier is zero or beyond the plausible range.
    #[error("Implausible section identifier ({0}).")]
    Id(u16),
    /// Length is zero or larger than the file.
    #[error("Implausible section length ({0}).")]
    Length(u32),
    /// Offset is at or beyond the end of the file.
    #[error("Implausible section offset ({0}).")]
    Offset(u32),
}

/// State token to decode an entry of a strict directory.
#[derive(Debug)]
pub struct DirectoryEntry {
    pub(super) entries_remaining: u32,
}

impl DirectoryEntry {
    /// Transition to another state by decoding a directory entry.
    ///
    /// Returns the validated entry and a successor state token. A single
    /// implausible entry invalidates the whole directory.
    pub fn advance(
        self,
        r: [u8; ENTRY_LEN],
        bounds: Bounds,
    ) -> Result<(SectionEntry, Either<DirectoryEntry, DirectoryEnd>), EntryError> {
        let entry = SectionEntry::from_bytes(r);
        entry.check(bounds)?;

        let entries_remaining = self.entries_remaining - 1;

        let successor = if entries_remaining != 0 {
            Left(DirectoryEntry { entries_remaining })
        } else {
            Right(DirectoryEnd(()))
        };

        Ok((entry, successor))
    }

    /// Number of entries yet to be decoded, including this one.
    pub fn remaining(&self) -> u32 {
        self.entries_remaining
    }
}

/// State token marking the end of a strict directory.
#[derive(Debug)]
pub struct DirectoryEnd(pub(super) ());
