#![doc = "jdi-core: the line transform behind jdi."]

//! This crate turns source files into literate Markdown documents.
//! Single-line `//` comments become prose, everything else becomes fenced code,
//! in original line order. The binary crate only adds argument parsing and
//! configuration on top of what lives here.
//!
//! # Usage
//! Use [`transform`] directly for in-memory lines, [`document`] for files on
//! disk and [`batch`] to document many files concurrently.

pub mod batch;
pub mod classify;
pub mod config;
pub mod contract;
pub mod document;
pub mod transform;

pub use config::TransformConfig;
pub use contract::{DocError, Documenter, WrittenDoc};
pub use transform::{classify, finalize, ClassifierState};
