//! Convenience interfaces for decoding whole files.
//!
//! The functions in this module run the full pipeline (magic token, section
//! directory, waveform section, heart rate) over a byte slice or a reader. A
//! file that fails any stage returns a typed [`slice::Error`] describing that
//! stage; it never affects other files, so batch drivers should report the
//! error and move on.
//!
//! ```
//! for path in paths {
//!     let bytes = std::fs::read(&path)?;
//!     match scp_waveform::avec::decode_slice(&bytes, &config) {
//!         Ok(analysis) => write_outputs(&path, &analysis)?,
//!         Err(err) => eprintln!("{}: {err}", path.display()),
//!     }
//! }
//! ```

use core::fmt;

pub mod directory;
pub mod reader;
pub mod section;
pub mod slice;

pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::sans::entry::SectionEntry;

/// How a directory was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The bytes after the magic token followed the documented layout.
    Strict,
    /// The documented layout was rejected, and entries were found by scanning.
    ///
    /// Scanned directories are best-effort: overlapping candidates are
    /// resolved by keeping the first found for each identifier.
    Fallback,
}

/// The sections found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<SectionEntry>,
    origin: Origin,
}

impl Directory {
    pub(crate) fn new(entries: Vec<SectionEntry>, origin: Origin) -> Self {
        Self { entries, origin }
    }

    /// Entries in directory order (strict) or identifier order (fallback).
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The first entry with an identifier, if any.
    pub fn get(&self, id: u16) -> Option<&SectionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: u16) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} sections", self.entries.len())?;

        if self.origin == Origin::Fallback {
            write!(f, " (fallback scan)")?;
        }

        writeln!(f, ":")?;

        for entry in &self.entries {
            writeln!(f, "  {entry}")?;
        }

        Ok(())
    }
}
