//! Command implementations for the classloader-model CLI

pub mod completions;
pub mod helpers;
pub mod resolve;
pub mod show;
pub mod version;
