//! Helpers for locating the magic token and previewing file headers.

use core::fmt;

/// The token identifying an SCP-ECG file.
pub const MAGIC: &[u8; 6] = b"SCPECG";

/// Number of header bytes captured by a [`Preview`].
pub const PREVIEW_LEN: usize = 64;

/// Find the first occurrence of the magic token within the first `window`
/// bytes.
///
/// The token must lie entirely inside the window. Returns its offset, or
/// `None` when the file does not belong to the supported format.
pub fn find_magic(r: &[u8], window: usize) -> Option<usize> {
    let end = r.len().min(window);

    r[..end].windows(MAGIC.len()).position(|w| w == MAGIC)
}

/// A best-effort look at the first bytes of a file, for diagnosing files
/// rejected by [`find_magic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a> {
    head: &'a [u8],
}

impl<'a> Preview<'a> {
    pub fn new(r: &'a [u8]) -> Self {
        Self {
            head: &r[..r.len().min(PREVIEW_LEN)],
        }
    }

    /// Printable ASCII bytes as characters, everything else as `.`.
    pub fn ascii(&self) -> String {
        self.head
            .iter()
            .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
            .collect()
    }

    /// Lowercase hexadecimal, two digits per byte.
    pub fn hex(&self) -> String {
        use core::fmt::Write;

        self.head.iter().fold(String::new(), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
    }
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Head (ASCII best-effort): {}", self.ascii())?;
        write!(f, "Head (HEX): {}", self.hex())
    }
}
