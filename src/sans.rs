//! Fixed-size building blocks for locating and reading a section directory.
//!
//! This module is intended for applications that need fine control over how
//! bytes are fetched, for example when the directory is read from a device
//! rather than from a complete in-memory file. See [`crate::avec`] for
//! implementations covering whole files.
//!
//! # Architecture
//!
//! The strict directory layout is represented by zero-size, non-copy state
//! tokens. Once enough bytes are ready, transition to another state by calling
//! the token's `advance` method. This will return a successor state token,
//! along with any extracted data, or an error describing why the directory is
//! not in the documented layout.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Some areas of recovery are not represented by the state tokens and must be
//! carefully written:
//!
//! - Locating the magic token. A helper function is provided in the [`magic`]
//!   module.
//!
//! - Reading bytes from the correct place in the file. The directory header
//!   begins immediately after the magic token.
//!
//! - Falling back to a heuristic scan when the strict layout is rejected.
//!   Plausibility checks shared by both approaches live in the [`entry`]
//!   module.

pub mod entry;
pub mod header;
pub mod magic;

/// Entrypoint to the strict directory states.
pub type Decoder = header::DirectoryHeader;
