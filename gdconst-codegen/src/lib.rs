//! C# constants generation for Godot projects.
//!
//! # Module Organization
//!
//! - [`csharp`] - C# syntax nodes (CsFile, StaticClass, Field, Using) and the SourceWriter
//! - [`Artifact`] - The four generated constants classes
//! - [`Generator`] - Configuration and audio layout passes
//! - [`Diagnostic`] - Non-fatal problems collected during a pass

mod artifact;
pub mod csharp;
mod diagnostic;
mod generator;

pub use artifact::{Artifact, file_name};
pub use diagnostic::{Diagnostic, Severity};
pub use generator::{
    ArtifactOutcome, ArtifactReport, Generator, PassReport, PassStatus, Plan, PlannedArtifact,
    PreviewFile, Trigger,
};
