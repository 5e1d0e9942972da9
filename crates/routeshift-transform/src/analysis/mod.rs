//! Analysis utilities for the transform passes
//!
//! Read-only walks over a module that passes use to decide what is safe to
//! remove.

pub mod references;

pub use references::{analyze_references, ReferenceAnalysis, ReferenceCount};
