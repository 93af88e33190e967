use std::path::Path;
use tracing::{debug, trace};

use crate::errors::DepGraphError;
use crate::filter::FilterEngine;
use crate::graph::resolver::{BuildConfig, PackageResolver};
use crate::graph::PackageRegistry;

/// Traversal switches shared by the walker and the DOT generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Follow imports of standard-library packages instead of treating them as leaves.
    pub delve_goroot: bool,
    /// Add test and external-test imports to each package's import list.
    pub include_tests: bool,
}

/// Depth-first package discovery driven by a `PackageResolver`.
///
/// Registry membership is the only visited check: a package already present is never
/// descended into again, which also breaks import cycles.
pub struct GraphWalker<'a, R: PackageResolver + ?Sized> {
    resolver: &'a R,
    filter: &'a FilterEngine,
    options: WalkOptions,
    build: &'a BuildConfig,
}

impl<'a, R: PackageResolver + ?Sized> GraphWalker<'a, R> {
    #[must_use]
    pub fn new(
        resolver: &'a R,
        filter: &'a FilterEngine,
        options: WalkOptions,
        build: &'a BuildConfig,
    ) -> Self {
        Self { resolver, filter, options, build }
    }

    /// Resolve each root from `root_dir`, stopping at the first failure.
    ///
    /// # Errors
    /// Returns `DepGraphError::Resolution` for the first package that fails to resolve.
    pub fn walk_roots<S: AsRef<str>>(
        &self,
        registry: &mut PackageRegistry,
        root_dir: &Path,
        roots: &[S],
    ) -> Result<(), DepGraphError> {
        for root in roots {
            self.resolve(registry, root_dir, root.as_ref(), 0)?;
        }
        debug!(packages = registry.len(), "walk finished");
        Ok(())
    }

    /// Resolve `identifier` from `root_dir` and recurse into its imports.
    ///
    /// `depth` is the caller's depth; roots are passed 0 and resolve at depth 1.
    /// Roots are never pruned by the depth limit, even when it is 0.
    ///
    /// # Errors
    /// Returns `DepGraphError::Resolution` if this package or any package below it
    /// fails to resolve. The error is returned as-is from the deepest failure.
    pub fn resolve(
        &self,
        registry: &mut PackageRegistry,
        root_dir: &Path,
        identifier: &str,
        depth: usize,
    ) -> Result<(), DepGraphError> {
        let depth = depth + 1;
        if depth > self.filter.config().max_depth.max(1) {
            trace!(package = identifier, depth, "depth limit reached");
            return Ok(());
        }
        if self.filter.is_ignored_name(identifier) {
            return Ok(());
        }

        debug!(package = identifier, root = %root_dir.display(), depth, "resolving");
        let pkg = self.resolver.import(identifier, root_dir, self.build).map_err(|source| {
            DepGraphError::Resolution { package: identifier.to_string(), source }
        })?;

        if !self.filter.is_visible(&pkg) {
            trace!(package = pkg.normalized_path(), "filtered out");
            return Ok(());
        }

        let stop_here = pkg.goroot && !self.options.delve_goroot;
        let imports = pkg.imports(self.options.include_tests);
        let dir = pkg.dir.clone();
        registry.insert_if_absent(pkg);

        if stop_here {
            return Ok(());
        }
        for imp in &imports {
            if !registry.contains(imp) {
                self.resolve(registry, &dir, imp, depth)?;
            }
        }
        Ok(())
    }
}
