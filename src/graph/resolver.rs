use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::{DepGraphError, ResolveError};
use crate::graph::{normalize_vendor, Package};

/// Build settings forwarded verbatim to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    pub tags: Vec<String>,
}

/// Looks up package metadata for an import identifier relative to a search root.
pub trait PackageResolver {
    /// # Errors
    /// Returns a `ResolveError` when the identifier cannot be resolved from `search_root`.
    fn import(
        &self,
        identifier: &str,
        search_root: &Path,
        build: &BuildConfig,
    ) -> Result<Package, ResolveError>;
}

/// Environment variable overriding the `go` binary used by `GoListResolver`.
pub const GO_BINARY_ENV: &str = "GODEPGRAPH_GO";

/// Resolves packages by running `go list -json` inside the search root.
#[derive(Debug, Clone)]
pub struct GoListResolver {
    program: PathBuf,
}

impl Default for GoListResolver {
    fn default() -> Self {
        let program = std::env::var_os(GO_BINARY_ENV).map_or_else(|| PathBuf::from("go"), PathBuf::from);
        Self { program }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListPackage {
    import_path: String,
    #[serde(default)]
    dir: PathBuf,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    test_imports: Vec<String>,
    #[serde(default, rename = "XTestImports")]
    xtest_imports: Vec<String>,
    #[serde(default)]
    goroot: bool,
    #[serde(default)]
    cgo_files: Vec<String>,
    #[serde(default)]
    error: Option<GoListError>,
}

#[derive(Debug, Deserialize)]
struct GoListError {
    #[serde(rename = "Err")]
    err: String,
}

impl GoListResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_program<P: Into<PathBuf>>(program: P) -> Self {
        Self { program: program.into() }
    }

    fn decode(stdout: &[u8]) -> Result<Package, ResolveError> {
        let raw: GoListPackage = serde_json::from_slice(stdout)?;
        if let Some(e) = raw.error {
            return Err(ResolveError::Tool(e.err));
        }
        // go list reports vendor-expanded import paths; map them back to source form
        let source_form = |v: Vec<String>| -> Vec<String> {
            v.into_iter().map(|s| normalize_vendor(&s).to_string()).collect()
        };
        Ok(Package {
            import_path: raw.import_path,
            dir: raw.dir,
            imports: source_form(raw.imports),
            test_imports: source_form(raw.test_imports),
            xtest_imports: source_form(raw.xtest_imports),
            goroot: raw.goroot,
            cgo_files: raw.cgo_files,
        })
    }
}

impl PackageResolver for GoListResolver {
    fn import(
        &self,
        identifier: &str,
        search_root: &Path,
        build: &BuildConfig,
    ) -> Result<Package, ResolveError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("list").arg("-json");
        if !build.tags.is_empty() {
            cmd.arg(format!("-tags={}", build.tags.join(",")));
        }
        cmd.arg(identifier).current_dir(search_root);
        let output = cmd.output().map_err(|source| ResolveError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let msg = if stderr.is_empty() {
                format!("go list exited with code {:?}", output.status.code())
            } else {
                stderr
            };
            return Err(ResolveError::Tool(msg));
        }
        Self::decode(&output.stdout)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ManifestEntry {
    import_path: Option<String>,
    #[serde(default)]
    dir: Option<PathBuf>,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    test_imports: Vec<String>,
    #[serde(default)]
    xtest_imports: Vec<String>,
    #[serde(default)]
    goroot: bool,
    #[serde(default)]
    cgo_files: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct Manifest {
    #[serde(default)]
    packages: HashMap<String, ManifestEntry>,
}

/// Resolves packages from a fixed table keyed by import identifier.
///
/// The search root is ignored; every identifier resolves the same way from anywhere.
#[derive(Debug, Clone, Default)]
pub struct ManifestResolver {
    packages: HashMap<String, Package>,
}

impl ManifestResolver {
    /// Build a resolver where each package is reachable under its own import path.
    pub fn from_packages<I: IntoIterator<Item = Package>>(packages: I) -> Self {
        let packages = packages.into_iter().map(|p| (p.import_path.clone(), p)).collect();
        Self { packages }
    }

    /// Register `pkg` under an identifier other than its import path (e.g. a vendored copy).
    pub fn insert_alias(&mut self, identifier: &str, pkg: Package) {
        self.packages.insert(identifier.to_string(), pkg);
    }

    /// Parse a JSON manifest: `{"packages": {"<identifier>": { ... }}}`.
    ///
    /// # Errors
    /// Returns `DepGraphError::Configuration` if the JSON does not match the manifest shape.
    pub fn from_json(data: &str) -> Result<Self, DepGraphError> {
        let manifest: Manifest = serde_json::from_str(data)
            .map_err(|e| DepGraphError::Configuration(format!("invalid package manifest: {e}")))?;
        let packages = manifest
            .packages
            .into_iter()
            .map(|(id, entry)| {
                let pkg = Package {
                    import_path: entry.import_path.unwrap_or_else(|| id.clone()),
                    dir: entry.dir.unwrap_or_else(|| PathBuf::from(&id)),
                    imports: entry.imports,
                    test_imports: entry.test_imports,
                    xtest_imports: entry.xtest_imports,
                    goroot: entry.goroot,
                    cgo_files: entry.cgo_files,
                };
                (id, pkg)
            })
            .collect();
        Ok(Self { packages })
    }

    /// # Errors
    /// Returns `DepGraphError::Io` if the file cannot be read, or a configuration error
    /// if its contents are not a valid manifest.
    pub fn from_path(path: &Path) -> Result<Self, DepGraphError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageResolver for ManifestResolver {
    fn import(
        &self,
        identifier: &str,
        search_root: &Path,
        _build: &BuildConfig,
    ) -> Result<Package, ResolveError> {
        self.packages.get(identifier).cloned().ok_or_else(|| ResolveError::NotFound {
            identifier: identifier.to_string(),
            search_root: search_root.to_path_buf(),
        })
    }
}
