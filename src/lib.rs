//! Defensive decoding of SCP-ECG records: section-directory recovery,
//! waveform extraction, and heart-rate estimation.
//!
//! An SCP-ECG file identifies itself with the `SCPECG` magic token, followed
//! by a directory of variable-length, variable-offset sections. Real-world
//! files frequently deviate from the documented layout, so directory recovery
//! first attempts a strict parse and, when that fails validation, falls back
//! to a heuristic byte scan.
//!
//! Most users should begin with the functions in the [`avec`] module, which
//! run the whole pipeline over a byte slice or reader. The [`sans`] module
//! exposes the fixed-size building blocks for applications needing finer
//! control.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `serde`: derive `Serialize` and `Deserialize` for configuration and
//!   output types.

pub mod avec;
pub mod config;
pub mod heart;
pub mod sans;
pub mod waveform;

pub use config::{Config, Limits};
