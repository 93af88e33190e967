use crate::cli::Cli;
use crate::errors::DepGraphError;
use crate::filter::{FilterConfig, FilterEngine, DEFAULT_MAX_DEPTH};
use crate::graph::resolver::{BuildConfig, GoListResolver, ManifestResolver, PackageResolver};
use crate::graph::walker::{GraphWalker, WalkOptions};
use crate::graph::DiscoverySession;
use crate::rewrite::{parse_color_rules, parse_name_rules, PrefixRules, RewriteConfig, Rewriter};
use crate::utils::config::{self, Config};
use crate::utils::csv::split_opt;
use crate::visualization::{DotGenerator, DotOptions, RankDir};
use clap::CommandFactory;
use clap_complete::generate;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Everything a run needs, after merging the config file with command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub roots: Vec<String>,
    pub filter: FilterConfig,
    pub walk: WalkOptions,
    pub build: BuildConfig,
    pub rewrite: RewriteConfig,
    pub rankdir: RankDir,
    pub manifest: Option<PathBuf>,
}

impl Settings {
    /// Merge `cfg` (if any) with `cli`. Flags extend lists, switch booleans on, and
    /// override scalars from the file.
    ///
    /// # Errors
    /// Returns `DepGraphError::Configuration` for malformed rewrite/color specs or
    /// when no root package was given.
    pub fn resolve(cli: &Cli, cfg: Option<Config>) -> Result<Self, DepGraphError> {
        if cli.packages.is_empty() {
            return Err(DepGraphError::Configuration(
                "need one package name to process".to_string(),
            ));
        }

        let cfg = cfg.unwrap_or_default();
        let file_filter = cfg.filter.unwrap_or_default();
        let file_walk = cfg.walk.unwrap_or_default();
        let file_rewrite = cfg.rewrite.unwrap_or_default();
        let file_output = cfg.output.unwrap_or_default();

        let mut ignored_prefixes = file_filter.ignore_prefixes;
        ignored_prefixes.extend(split_opt(cli.ignore_prefixes.as_deref()));
        let mut only_prefixes = file_filter.only_prefixes;
        only_prefixes.extend(split_opt(cli.only_prefixes.as_deref()));
        let mut ignored: std::collections::HashSet<String> =
            file_filter.ignore_packages.into_iter().collect();
        ignored.extend(split_opt(cli.ignore_packages.as_deref()));

        let filter = FilterConfig {
            ignored,
            ignored_prefixes,
            only_prefixes,
            ignore_stdlib: cli.ignore_stdlib || file_filter.ignore_stdlib.unwrap_or(false),
            max_depth: cli.max_level.or(file_filter.max_level).unwrap_or(DEFAULT_MAX_DEPTH),
        };

        let walk = WalkOptions {
            delve_goroot: cli.delve_goroot || file_walk.delve_goroot.unwrap_or(false),
            include_tests: cli.include_tests || file_walk.include_tests.unwrap_or(false),
        };

        let mut tags = file_walk.tags;
        tags.extend(split_opt(cli.tags.as_deref()));

        // File rules first so that a flag for the same prefix replaces them.
        let mut names: PrefixRules =
            file_rewrite.names.iter().map(|(p, r)| (p.as_str(), r.as_str())).collect();
        names.extend(&parse_name_rules(&split_opt(cli.prefix_substitution.as_deref()))?);
        let mut colors: PrefixRules =
            file_rewrite.colors.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
        colors.extend(&parse_color_rules(&split_opt(cli.color_spec.as_deref()))?);
        let rewrite = RewriteConfig { names, colors };

        let horizontal = cli.horizontal || file_output.horizontal.unwrap_or(false);

        Ok(Self {
            roots: cli.packages.clone(),
            filter,
            walk,
            build: BuildConfig { tags },
            rewrite,
            rankdir: if horizontal { RankDir::LR } else { RankDir::TB },
            manifest: cli.manifest.as_ref().map(PathBuf::from),
        })
    }
}

/// Walk the graph from `settings.roots` and render it.
///
/// Nothing is returned unless every reachable package resolved.
///
/// # Errors
/// Returns the first `DepGraphError::Resolution` hit anywhere in the walk.
pub fn render_graph<R: PackageResolver + ?Sized>(
    settings: &Settings,
    resolver: &R,
    cwd: &Path,
) -> Result<String, DepGraphError> {
    let filter = FilterEngine::new(settings.filter.clone());
    let rewriter = Rewriter::new(settings.rewrite.clone());
    let mut session = DiscoverySession::new();

    let walker = GraphWalker::new(resolver, &filter, settings.walk, &settings.build);
    walker.walk_roots(&mut session.packages, cwd, settings.roots.as_slice())?;
    info!(packages = session.packages.len(), "resolved dependency graph");

    let opts = DotOptions { rankdir: settings.rankdir, walk: settings.walk };
    Ok(DotGenerator::new().generate_dot(&mut session, &filter, &rewriter, opts))
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        };
        EnvFilter::new(format!("godepgraph={level}"))
    });
    // A subscriber may already be installed when running in-process more than once.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

fn load_config(cli: &Cli, cwd: &Path) -> Result<Option<Config>, DepGraphError> {
    match cli.config.as_deref() {
        Some(path) => config::load_config_at(Path::new(path)).map(Some),
        None => config::load_config_near(cwd),
    }
}

fn run(cli: &Cli) -> Result<String, DepGraphError> {
    let cwd = std::env::current_dir()?;
    let cfg = load_config(cli, &cwd)?;
    let settings = Settings::resolve(cli, cfg)?;
    debug!(?settings, "effective settings");

    let resolver: Box<dyn PackageResolver> = match settings.manifest.as_deref() {
        Some(path) => Box::new(ManifestResolver::from_path(path)?),
        None => Box::new(GoListResolver::new()),
    };
    render_graph(&settings, &*resolver, &cwd)
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success). The graph is written to stdout only after the
/// whole walk succeeded; on failure stdout stays empty and the error goes to stderr.
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = env!("CARGO_PKG_NAME");
        generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return 0;
    }

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(dot) => {
            let mut out = io::stdout().lock();
            if let Err(e) = out.write_all(dot.as_bytes()).and_then(|()| out.flush()) {
                eprintln!("Failed to write output: {e}");
                return 1;
            }
            0
        }
        Err(e) => {
            eprintln!("{e}");
            1
        }
    }
}
