//! Package model and discovery state.
//!
//! This module defines the data the walk produces (`Package`, `PackageRegistry`)
//! and the `DiscoverySession` that owns it for the length of one run.
//!
//! You typically create a session, drive `walker::GraphWalker` over the root
//! packages, and hand the session to `crate::visualization::DotGenerator`.
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

pub mod ids;
pub mod resolver;
pub mod walker;

pub use ids::IdRegistry;

/// Strip everything up to and including the last `vendor/` in an import path.
#[must_use]
pub fn normalize_vendor(path: &str) -> &str {
    match path.rfind("vendor/") {
        Some(idx) => &path[idx + "vendor/".len()..],
        None => path,
    }
}

/// Resolved metadata for a single Go package.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Package {
    pub import_path: String,
    #[serde(default)]
    pub dir: PathBuf,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub test_imports: Vec<String>,
    #[serde(default)]
    pub xtest_imports: Vec<String>,
    /// Package lives in the toolchain's own source tree (standard library).
    #[serde(default)]
    pub goroot: bool,
    #[serde(default)]
    pub cgo_files: Vec<String>,
}

impl Package {
    /// Import path with vendoring segments removed. This is the registry key.
    #[must_use]
    pub fn normalized_path(&self) -> &str {
        normalize_vendor(&self.import_path)
    }

    #[must_use]
    pub fn has_native_sources(&self) -> bool {
        !self.cgo_files.is_empty()
    }

    /// Direct imports in declaration order, optionally followed by test imports.
    ///
    /// Duplicates keep their first position and the package's own path is dropped,
    /// so an external test importing the package under test never yields a self-loop.
    #[must_use]
    pub fn imports(&self, include_tests: bool) -> Vec<String> {
        let own = self.normalized_path();
        let mut all: Vec<&String> = self.imports.iter().collect();
        if include_tests {
            all.extend(self.test_imports.iter());
            all.extend(self.xtest_imports.iter());
        }
        let mut seen: HashSet<&str> = HashSet::with_capacity(all.len());
        let mut out = Vec::with_capacity(all.len());
        for imp in all {
            if imp == own || !seen.insert(imp.as_str()) {
                continue;
            }
            out.push(imp.clone());
        }
        out
    }
}

/// Normalized import path -> first resolved `Package`.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    packages: HashMap<String, Package>,
}

impl PackageRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `pkg` under its normalized path unless that path is already taken.
    ///
    /// Returns `true` when the package was inserted.
    pub fn insert_if_absent(&mut self, pkg: Package) -> bool {
        let key = pkg.normalized_path().to_string();
        if self.packages.contains_key(&key) {
            return false;
        }
        self.packages.insert(key, pkg);
        true
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Package> {
        self.packages.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.packages.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Registry keys in lexicographic order.
    #[must_use]
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.packages.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// State owned by one discovery run: what was resolved and the node IDs handed out.
#[derive(Debug, Default)]
pub struct DiscoverySession {
    pub packages: PackageRegistry,
    pub ids: IdRegistry,
}

impl DiscoverySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(path: &str, imports: &[&str]) -> Package {
        Package {
            import_path: path.to_string(),
            imports: imports.iter().map(|s| (*s).to_string()).collect(),
            ..Package::default()
        }
    }

    #[test]
    fn normalize_vendor_strips_through_last_vendor_segment() {
        assert_eq!(normalize_vendor("github.com/a/b"), "github.com/a/b");
        assert_eq!(normalize_vendor("example.com/app/vendor/github.com/x/y"), "github.com/x/y");
        assert_eq!(normalize_vendor("a/vendor/b/vendor/c"), "c");
        assert_eq!(normalize_vendor("vendor/golang.org/x/net/http2"), "golang.org/x/net/http2");
    }

    #[test]
    fn imports_dedup_and_drop_self() {
        let mut p = pkg("example.com/foo", &["fmt", "os", "fmt"]);
        p.test_imports = vec!["testing".into(), "os".into()];
        p.xtest_imports = vec!["example.com/foo".into(), "testing".into()];
        assert_eq!(p.imports(false), vec!["fmt", "os"]);
        assert_eq!(p.imports(true), vec!["fmt", "os", "testing"]);
    }

    #[test]
    fn self_reference_uses_normalized_path() {
        let mut p = pkg("example.com/app/vendor/github.com/x", &[]);
        p.xtest_imports = vec!["github.com/x".into(), "strings".into()];
        assert_eq!(p.imports(true), vec!["strings"]);
    }

    #[test]
    fn registry_keeps_first_insert() {
        let mut reg = PackageRegistry::new();
        let mut first = pkg("app/vendor/lib", &["a"]);
        first.dir = PathBuf::from("/first");
        let mut second = pkg("lib", &["b"]);
        second.dir = PathBuf::from("/second");
        assert!(reg.insert_if_absent(first));
        assert!(!reg.insert_if_absent(second));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("lib").map(|p| p.dir.clone()), Some(PathBuf::from("/first")));
    }

    #[test]
    fn sorted_paths_are_lexicographic() {
        let mut reg = PackageRegistry::new();
        for p in ["os", "fmt", "github.com/z", "bufio"] {
            reg.insert_if_absent(pkg(p, &[]));
        }
        assert_eq!(reg.sorted_paths(), vec!["bufio", "fmt", "github.com/z", "os"]);
    }
}
