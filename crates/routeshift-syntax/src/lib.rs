//! routeshift syntax - parsing and printing of route modules
//!
//! Thin layer over the swc parser and code generator. A file is parsed into
//! a [`ParsedModule`], mutated in place by the transform passes, and printed
//! back with its comments.

mod error;
mod module;
mod span;

pub use error::*;
pub use module::*;
pub use span::*;
