//! Dependency resolution for classloader models
//!
//! This module handles:
//! - Querying dependency graphs through a provider interface
//! - Filtering the application's base dependency set
//! - Reconciling plugin versions and rejecting incompatible plugin sets
//! - Resolving additional plugin dependencies from build configuration
//! - Walking API specification fragment graphs
//! - Assembling the composite model of a deployable

pub mod additional;
pub mod application;
pub mod assembler;
pub mod compatibility;
pub mod conflicts;
pub mod provider;
pub mod repository;
pub mod resources;

pub use assembler::ApplicationClassLoaderModelAssembler;
pub use repository::RepositoryProvider;
