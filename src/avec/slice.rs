//! Slice-based pipeline implementation.

use thiserror::Error;

use crate::{
    Config,
    heart::{self, HeartRateEstimate},
    sans::magic::find_magic,
    waveform::{self, DecodeError, DecodedSignal},
};

use super::{
    Directory,
    directory::recover,
    section::{self, SectionError},
};

/// Errors ending the processing of one file.
#[derive(Debug, Error)]
pub enum Error {
    /// The magic token is absent, so the file is not in the supported format.
    #[error("Magic token not found in the first {window} bytes.")]
    FormatNotRecognized { window: usize },
    /// Neither a strict parse nor a fallback scan found any section.
    #[error("No section directory could be recovered.")]
    DirectoryUnrecoverable,
    /// The directory has no entry for the requested section.
    #[error("Section {0} is not present.")]
    SectionMissing(u16),
    /// The requested section cannot be decoded as samples.
    #[error("Section {id} is malformed: {source}")]
    SectionMalformed {
        id: u16,
        #[source]
        source: Malformed,
    },
}

/// Why a section could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Samples(#[from] DecodeError),
}

/// Everything recovered from one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Offset of the magic token.
    pub magic: usize,
    pub directory: Directory,
    pub signal: DecodedSignal,
    pub heart_rate: HeartRateEstimate,
}

/// Find the magic token of a file.
pub fn locate(r: &[u8], config: &Config) -> Result<usize, Error> {
    let window = config.limits.magic_window;

    find_magic(r, window).ok_or(Error::FormatNotRecognized { window })
}

/// Recover the section directory of a file, without decoding any section.
pub fn directory(r: &[u8], config: &Config) -> Result<Directory, Error> {
    let magic = locate(r, config)?;

    recover(r, magic, &config.limits).ok_or(Error::DirectoryUnrecoverable)
}

/// Decode the waveform section of a file and estimate its heart rate.
///
/// This method is also re-exported as `scp_waveform::avec::decode_slice`.
pub fn decode(r: &[u8], config: &Config) -> Result<Analysis, Error> {
    let magic = locate(r, config)?;

    let directory = recover(r, magic, &config.limits).ok_or(Error::DirectoryUnrecoverable)?;

    let id = config.section;

    let malformed = |source: Malformed| Error::SectionMalformed { id, source };

    let bytes = section::extract(r, &directory, id)
        .ok_or(Error::SectionMissing(id))?
        .checked(config.section_length)
        .map_err(|err| malformed(err.into()))?;

    let signal = waveform::decode(bytes, config).map_err(|err| malformed(err.into()))?;
    let heart_rate = heart::estimate(&signal);

    Ok(Analysis {
        magic,
        directory,
        signal,
        heart_rate,
    })
}
