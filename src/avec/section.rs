//! Extraction of one section's bytes from a file.

use thiserror::Error;

use super::Directory;

/// A section whose bytes do not have the expected length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    /// The section is shorter or longer than required.
    #[error("Expected {expected} bytes, found {found}.")]
    LengthMismatch { expected: usize, found: usize },
}

/// The bytes of a section, as sliced from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub id: u16,
    /// Length declared by the directory entry.
    pub declared_length: u32,
    /// The bytes available in the file, truncated at its end.
    pub bytes: &'a [u8],
}

impl<'a> Section<'a> {
    /// Confirm the section has exactly `expected` bytes, or its declared length
    /// when no length is required.
    pub fn checked(self, expected: Option<usize>) -> Result<&'a [u8], SectionError> {
        let expected = expected.unwrap_or(self.declared_length as usize);
        let found = self.bytes.len();

        if found != expected {
            Err(SectionError::LengthMismatch { expected, found })?;
        }

        Ok(self.bytes)
    }
}

/// Slice a section out of a file, if the directory lists it.
///
/// A missing section is not an error in itself, as some files legitimately
/// omit optional sections.
pub fn extract<'a>(r: &'a [u8], directory: &Directory, id: u16) -> Option<Section<'a>> {
    let entry = directory.get(id)?;

    let start = (entry.offset as usize).min(r.len());
    let end = usize::try_from(entry.end()).map_or(r.len(), |end| end.min(r.len()));

    Some(Section {
        id,
        declared_length: entry.length,
        bytes: &r[start..end],
    })
}
