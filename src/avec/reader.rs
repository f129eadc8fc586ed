//! Reader-based pipeline implementation.
//!
//! Files are read completely into memory in a single bulk read, then decoded
//! as slices.

use std::io::Read;

use thiserror::Error;

use crate::Config;

use super::{Directory, slice::Analysis};

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The bytes read could not be decoded.
    #[error(transparent)]
    Decode(#[from] super::slice::Error),
}

/// Read a whole file, then decode its waveform and heart rate.
///
/// This method is also re-exported as `scp_waveform::avec::decode_reader`.
pub fn decode(r: &mut impl Read, config: &Config) -> Result<Analysis, Error> {
    let bytes = read(r)?;

    Ok(super::slice::decode(&bytes, config)?)
}

/// Read a whole file, then recover its section directory.
pub fn directory(r: &mut impl Read, config: &Config) -> Result<Directory, Error> {
    let bytes = read(r)?;

    Ok(super::slice::directory(&bytes, config)?)
}

fn read(r: &mut impl Read) -> Result<Vec<u8>, std::io::Error> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)?;

    Ok(bytes)
}
