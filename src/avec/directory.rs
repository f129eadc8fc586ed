//! Recovery of a section directory, strictly or by heuristic scan.

use std::collections::{BTreeMap, btree_map::Entry};

use either::Either::{Left, Right};
use log::{debug, info};
use thiserror::Error;

use crate::{
    Limits,
    sans::{
        Decoder,
        entry::{Bounds, ENTRY_LEN, EntryError, SectionEntry},
        header::DirectoryHeaderError,
        magic::MAGIC,
    },
};

use super::{Directory, Origin};

/// Reasons a strict parse was rejected.
///
/// This is a normal outcome for non-conforming files, and leads to a fallback
/// scan rather than a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryInvalid {
    /// The directory header is unusable.
    #[error("Invalid directory header: {0}")]
    Header(#[from] DirectoryHeaderError),
    /// One of the declared entries is implausible.
    #[error("Invalid directory entry {index}: {source}")]
    Entry {
        index: u32,
        #[source]
        source: EntryError,
    },
}

/// Recover the directory of a file whose magic token is at `magic`.
///
/// Tries [`parse_strict`], then [`scan_fallback`]. Returns `None` only when
/// both fail.
pub fn recover(r: &[u8], magic: usize, limits: &Limits) -> Option<Directory> {
    let directory = match parse_strict(r, magic, limits) {
        Ok(directory) => directory,
        Err(err) => {
            debug!("Strict directory rejected ({err}), falling back to a scan.");
            scan_fallback(r, limits)?
        }
    };

    info!(
        "Recovered {} directory entries ({:?}).",
        directory.len(),
        directory.origin()
    );

    Some(directory)
}

/// Parse the directory in its documented layout, directly after the magic
/// token.
///
/// Either every declared entry is plausible and returned in order, or the
/// whole directory is rejected.
pub fn parse_strict(r: &[u8], magic: usize, limits: &Limits) -> Result<Directory, DirectoryInvalid> {
    let bounds = Bounds {
        file_size: r.len(),
        max_id: limits.max_section_id,
    };

    let start = magic.checked_add(MAGIC.len());
    let i = &mut start.ok_or(DirectoryHeaderError::Truncated)?; // Counter of bytes read.

    let header = take(r, i).ok_or(DirectoryHeaderError::Truncated)?;
    let (_, count, mut state) = Decoder::advance(header, r.len() - *i)?;

    let mut entries = Vec::with_capacity(count as usize);

    loop {
        let index = count - state.remaining();
        let bytes = take(r, i).ok_or(DirectoryHeaderError::Truncated)?;

        let (entry, successor) = state
            .advance(bytes, bounds)
            .map_err(|source| DirectoryInvalid::Entry { index, source })?;

        entries.push(entry);

        state = match successor {
            Left(state) => state,
            Right(_) => break,
        };
    }

    Ok(Directory::new(entries, Origin::Strict))
}

/// Reconstruct a directory by sliding over the start of the file, accepting
/// any position that reads as a plausible entry lying within the file.
///
/// After an acceptance the scan skips the whole entry; otherwise it advances
/// by the configured stride. When several candidates share an identifier, the
/// first found is kept. This tie-break is a heuristic: the result is a
/// best-effort guess, not an authoritative directory.
///
/// Returns entries sorted by identifier, or `None` if nothing was accepted.
pub fn scan_fallback(r: &[u8], limits: &Limits) -> Option<Directory> {
    let bounds = Bounds {
        file_size: r.len(),
        max_id: limits.max_section_id,
    };

    let window = &r[..r.len().min(limits.scan_window)];
    let stride = limits.scan_stride.max(1);

    let mut found = BTreeMap::new();
    let mut i = 0;

    while let Some(bytes) = peek(window, i) {
        let entry = SectionEntry::from_bytes(bytes);

        if entry.check(bounds).is_err() || !entry.fits(bounds) {
            i += stride;
            continue;
        }

        if let Entry::Vacant(slot) = found.entry(entry.id) {
            debug!("Accepted candidate entry at byte {i}: {entry}.");
            slot.insert(entry);
        }

        i += ENTRY_LEN;
    }

    if found.is_empty() {
        return None;
    }

    Some(Directory::new(found.into_values().collect(), Origin::Fallback))
}

/// Copy an exact number of bytes from an offset in a slice.
fn peek<const N: usize>(r: &[u8], i: usize) -> Option<[u8; N]> {
    r.get(i..i.checked_add(N)?)?.try_into().ok()
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Option<[u8; N]> {
    let bytes = peek(r, *i)?;
    *i += N;

    Some(bytes)
}
