//! Package visibility rules.
//!
//! The same `FilterEngine` is consulted while walking (to prune descent) and while
//! emitting DOT (to prune output), so what gets drawn always matches what was walked.
//!
//! Prefix rules are plain string prefixes and do not respect path segments:
//! an exclusion prefix `foo` also hides `foobar`.
use std::collections::HashSet;

use crate::graph::Package;

/// The cgo pseudo-package. It never resolves to real sources, so it is always excluded.
pub const CGO_PSEUDO_PACKAGE: &str = "C";

/// Default recursion limit when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub ignored: HashSet<String>,
    pub ignored_prefixes: Vec<String>,
    /// Allow-list; when non-empty a package must match at least one entry.
    pub only_prefixes: Vec<String>,
    pub ignore_stdlib: bool,
    pub max_depth: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignored: HashSet::new(),
            ignored_prefixes: Vec::new(),
            only_prefixes: Vec::new(),
            ignore_stdlib: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterEngine {
    config: FilterConfig,
}

fn has_any_prefix(s: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| s.starts_with(p.as_str()))
}

impl FilterEngine {
    #[must_use]
    pub fn new(mut config: FilterConfig) -> Self {
        config.ignored.insert(CGO_PSEUDO_PACKAGE.to_string());
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Exact-name exclusion, checked on raw identifiers before resolution.
    #[must_use]
    pub fn is_ignored_name(&self, name: &str) -> bool {
        self.config.ignored.contains(name)
    }

    #[must_use]
    pub fn is_visible(&self, pkg: &Package) -> bool {
        let path = pkg.normalized_path();
        if !self.config.only_prefixes.is_empty() && !has_any_prefix(path, &self.config.only_prefixes)
        {
            return false;
        }
        !(self.config.ignored.contains(path)
            || (pkg.goroot && self.config.ignore_stdlib)
            || has_any_prefix(path, &self.config.ignored_prefixes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(path: &str, goroot: bool) -> Package {
        Package { import_path: path.to_string(), goroot, ..Package::default() }
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn cgo_pseudo_package_always_ignored() {
        let f = FilterEngine::new(FilterConfig::default());
        assert!(f.is_ignored_name("C"));
        assert!(!f.is_visible(&pkg("C", false)));
        assert!(f.is_visible(&pkg("fmt", true)));
    }

    #[test]
    fn allow_list_then_exclusion_prefix() {
        let f = FilterEngine::new(FilterConfig {
            only_prefixes: strings(&["github.com/acme"]),
            ignored_prefixes: strings(&["github.com/acme/internal"]),
            ..FilterConfig::default()
        });
        assert!(!f.is_visible(&pkg("github.com/acme/internal/x", false)));
        assert!(f.is_visible(&pkg("github.com/acme/pub", false)));
        assert!(!f.is_visible(&pkg("github.com/other/pub", false)));
        assert!(!f.is_visible(&pkg("fmt", true)));
    }

    #[test]
    fn stdlib_exclusion() {
        let f = FilterEngine::new(FilterConfig { ignore_stdlib: true, ..FilterConfig::default() });
        assert!(!f.is_visible(&pkg("fmt", true)));
        assert!(f.is_visible(&pkg("fmt", false)));
    }

    #[test]
    fn exact_exclusion_uses_normalized_path() {
        let mut ignored = HashSet::new();
        ignored.insert("github.com/x".to_string());
        let f = FilterEngine::new(FilterConfig { ignored, ..FilterConfig::default() });
        assert!(!f.is_visible(&pkg("example.com/app/vendor/github.com/x", false)));
        assert!(f.is_visible(&pkg("github.com/x/sub", false)));
    }

    #[test]
    fn prefix_match_is_not_segment_aware() {
        let f = FilterEngine::new(FilterConfig {
            ignored_prefixes: strings(&["foo"]),
            ..FilterConfig::default()
        });
        assert!(!f.is_visible(&pkg("foobar", false)));
        assert!(!f.is_visible(&pkg("foo/bar", false)));
        assert!(f.is_visible(&pkg("barfoo", false)));
    }
}
