//! Dependency provider interface
//!
//! All repository and filesystem access of the resolution engine goes
//! through [`DependencyProvider`]. Providers answer with explicit options:
//! `Ok(None)` means "unknown artifact", never an error.
//!
//! ## Dependency trees
//!
//! [`DependencyProvider::resolve_transitive`] returns the direct dependencies
//! of a coordinate, each carrying its own resolved dependencies:
//!
//! ```text
//! app
//!  ├── mule-http-connector (mule-plugin)
//!  │    └── commons-io
//!  └── driver
//!       └── commons-io
//! ```
//!
//! [`flatten`] turns such a forest into a list, nearest occurrence first.
//!
//! A coordinate reached along several routes shares one expanded subtree, so
//! diamond-shaped graphs stay linear in the number of distinct coordinates.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{Artifact, Coordinate, Scope};
use crate::error::{Result, resolution};

/// Which dependency scopes a resolution keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeFilter {
    /// compile, runtime and system; provided only on the first level
    #[default]
    Runtime,
    /// compile, provided and system
    #[allow(dead_code)]
    Compile,
    /// Every scope
    All,
}

impl ScopeFilter {
    /// Whether a dependency of `scope` found at `depth` (0 = direct) is kept
    pub fn accepts(self, scope: Scope, depth: usize) -> bool {
        match self {
            ScopeFilter::Runtime => match scope {
                Scope::Compile | Scope::Runtime | Scope::System => true,
                Scope::Provided => depth == 0,
                Scope::Test | Scope::Import => false,
            },
            ScopeFilter::Compile => {
                matches!(scope, Scope::Compile | Scope::Provided | Scope::System)
            }
            ScopeFilter::All => true,
        }
    }
}

/// A dependency as resolved by a provider, with its own dependencies
#[derive(Debug, Clone, PartialEq)]
pub struct BundleDependency {
    pub coordinate: Coordinate,
    pub location: Option<PathBuf>,
    pub dependencies: Arc<[BundleDependency]>,
}

impl BundleDependency {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            location: None,
            dependencies: Arc::from([]),
        }
    }

    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Declared scope, compile when none was declared
    pub fn scope(&self) -> Scope {
        self.coordinate.scope().unwrap_or_default()
    }
}

/// Packages and resources an artifact exposes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedContent {
    pub packages: Vec<String>,
    pub resources: Vec<String>,
}

/// Source of dependency graphs and artifact locations
pub trait DependencyProvider: Send + Sync {
    /// Direct dependencies of `coordinate` as trees, filtered by scope at
    /// every level, or `None` if the coordinate is unknown
    fn resolve_transitive(
        &self,
        coordinate: &Coordinate,
        filter: ScopeFilter,
    ) -> Result<Option<Vec<BundleDependency>>>;

    /// Location of the binary of `coordinate`, if it can be found
    fn resolve_location(&self, coordinate: &Coordinate) -> Result<Option<PathBuf>>;

    /// Packages and resources exposed by `coordinate`
    fn exported_content(&self, _coordinate: &Coordinate) -> Result<ExportedContent> {
        Ok(ExportedContent::default())
    }
}

/// Expand the dependency tree of `root` from a direct-edge lookup
///
/// `direct` returns the direct dependencies of a coordinate without their
/// subtrees, or `None` for an unknown coordinate. Dependencies rejected by
/// `filter` are dropped together with their subtree. A coordinate already on
/// the current path is not expanded again, which cuts cycles.
///
/// Every coordinate is looked up and expanded at most once unless its
/// subtree was cut by a cycle through one of its ancestors.
pub fn expand_tree<F>(root: &Coordinate, filter: ScopeFilter, direct: F) -> Option<Vec<BundleDependency>>
where
    F: Fn(&Coordinate) -> Option<Vec<BundleDependency>>,
{
    let children = direct(root)?;
    let mut expansion = TreeExpansion {
        filter,
        direct: &direct,
        path: vec![root.clone()],
        subtrees: HashMap::new(),
    };
    let (expanded, _) = expansion.expand_level(children, 0);
    Some(expanded)
}

struct TreeExpansion<'f, F> {
    filter: ScopeFilter,
    direct: &'f F,
    path: Vec<Coordinate>,
    /// Expanded children of coordinates whose subtree is path independent
    subtrees: HashMap<Coordinate, Arc<[BundleDependency]>>,
}

impl<F> TreeExpansion<'_, F>
where
    F: Fn(&Coordinate) -> Option<Vec<BundleDependency>>,
{
    /// Expand `children` found at `depth`
    ///
    /// Also returns the shallowest path index a cycle was cut against.
    fn expand_level(
        &mut self,
        children: Vec<BundleDependency>,
        depth: usize,
    ) -> (Vec<BundleDependency>, Option<usize>) {
        let mut expanded = Vec::with_capacity(children.len());
        let mut cut: Option<usize> = None;
        for mut child in children {
            if !self.filter.accepts(child.scope(), depth) {
                continue;
            }
            if let Some(index) = self.path.iter().position(|c| *c == child.coordinate) {
                cut = min_index(cut, Some(index));
                continue;
            }
            if let Some(subtree) = self.subtrees.get(&child.coordinate) {
                child.dependencies = Arc::clone(subtree);
            } else if let Some(grandchildren) = (self.direct)(&child.coordinate) {
                let own_index = self.path.len();
                self.path.push(child.coordinate.clone());
                let (subtree, child_cut) = self.expand_level(grandchildren, depth + 1);
                self.path.pop();

                let subtree: Arc<[BundleDependency]> = subtree.into();
                match child_cut {
                    Some(index) if index < own_index => cut = min_index(cut, Some(index)),
                    _ => {
                        self.subtrees
                            .insert(child.coordinate.clone(), Arc::clone(&subtree));
                    }
                }
                child.dependencies = subtree;
            }
            expanded.push(child);
        }
        (expanded, cut)
    }
}

fn min_index(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Flatten a dependency forest breadth-first
///
/// The first occurrence of a coordinate wins, so the nearest declaration
/// shadows deeper ones. With `stop_at_plugins` the walk includes plugin
/// nodes but does not descend below them.
pub fn flatten(roots: &[BundleDependency], stop_at_plugins: bool) -> Vec<&BundleDependency> {
    let mut seen: HashSet<&Coordinate> = HashSet::new();
    let mut queue: VecDeque<&BundleDependency> = roots.iter().collect();
    let mut flat = Vec::new();

    while let Some(node) = queue.pop_front() {
        if !seen.insert(&node.coordinate) {
            continue;
        }
        flat.push(node);
        if !(stop_at_plugins && node.coordinate.is_mule_plugin()) {
            queue.extend(node.dependencies.iter());
        }
    }
    flat
}

/// Turn a resolved dependency into an [`Artifact`]
///
/// # Errors
///
/// Returns `ModelError::LocationNotFound` when neither the dependency nor
/// the provider knows where its binary lives.
pub fn resolve_artifact(
    provider: &dyn DependencyProvider,
    dependency: &BundleDependency,
) -> Result<Artifact> {
    let location = match &dependency.location {
        Some(location) => location.clone(),
        None => provider
            .resolve_location(&dependency.coordinate)?
            .ok_or_else(|| resolution::location_not_found(dependency.coordinate.to_string()))?,
    };
    Ok(Artifact::new(dependency.coordinate.clone(), location))
}
