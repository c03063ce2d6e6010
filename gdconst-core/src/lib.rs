//! Core utilities and types for the gdconst constants generator.
//!
//! This crate provides the leaf pieces every generation pass relies on:
//! the artifact kinds, identifier sanitizing, and syncing rendered text to
//! disk without spurious writes.

mod artifact;
mod error;
mod file;
mod naming;

pub use artifact::ArtifactKind;
pub use error::FsError;
// File operations
pub use file::{GeneratedFile, SyncResult, ensure_dir, remove_if_exists, sync};
// Identifier utilities
pub use naming::{UNNAMED, is_identifier, sanitize};
