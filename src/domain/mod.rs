//! Domain models for classloader model resolution
//!
//! This module contains pure domain objects: artifact identities, resolved
//! artifacts, per-artifact classloader models and the composite model of a
//! deployable. They carry their own invariants and perform no I/O.

pub mod application;
pub mod artifact;
pub mod classloader;
pub mod coordinate;
pub mod packaging;

pub use application::{ApplicationClassLoaderModel, PluginModel};
pub use artifact::Artifact;
pub use classloader::{
    ClassLoaderModel, LEGACY_MODEL_VERSION, MODEL_VERSION, ResolvedPlugin, ViewKind,
};
pub use coordinate::{
    Coordinate, Scope,
};
pub use packaging::{PackagingKind, ProjectInformation, SharedLibrary};
