//! Shared building blocks for the `subsweep` workspace.
//!
//! * **[`config`]**: the explicit run configuration handed to the pipeline.
//! * **[`domain`]**: target parsing, the domain normalizer and the domain-set models.
//! * **[`collaborator`]**: contracts for the external recon tools.
//! * **[`error`]**: the error taxonomy shared between crates.

pub mod collaborator;
pub mod config;
pub mod domain;
pub mod error;
