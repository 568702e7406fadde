//! Classloader model documents
//!
//! This module contains:
//! - `document` - Serialized document schema and view rendering
//! - `writer` - Output layout below the build directory

pub mod document;
pub mod writer;

pub use document::{render, to_json};
pub use writer::ModelWriter;
