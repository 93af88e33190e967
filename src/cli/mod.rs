use clap::{ArgAction, Parser};
use clap_complete::Shell;

#[derive(Debug, Parser, Default)]
#[command(
    name = "godepgraph",
    version,
    about = "Go package dependency graph generator",
    long_about = "Resolve the transitive imports of one or more Go packages and print the graph in Graphviz DOT format. Pipe the output into `dot -Tpng` to render it. Package metadata comes from `go list -json` unless --manifest is given."
)]
pub struct Cli {
    /// Root packages to start from (import paths or relative directories)
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Ignore packages in the Go standard library
    #[arg(short = 's', long)]
    pub ignore_stdlib: bool,

    /// Show dependencies of packages in the Go standard library
    #[arg(short = 'd', long)]
    pub delve_goroot: bool,

    /// Comma-separated list of import path prefixes to ignore
    #[arg(short = 'p', long, value_name = "CSV")]
    pub ignore_prefixes: Option<String>,

    /// Comma-separated list of packages to ignore
    #[arg(short = 'i', long, value_name = "CSV")]
    pub ignore_packages: Option<String>,

    /// Comma-separated list of prefixes to include; everything else is hidden
    #[arg(short = 'o', long, value_name = "CSV")]
    pub only_prefixes: Option<String>,

    /// Include test packages
    #[arg(short = 't', long)]
    pub include_tests: bool,

    /// Max level of the dependency graph (default: 256)
    #[arg(short = 'l', long, value_name = "N")]
    pub max_level: Option<usize>,

    /// Comma-separated prefix replacements, e.g. github.com=gh
    #[arg(short = 'r', long = "rewrite", value_name = "CSV")]
    pub prefix_substitution: Option<String>,

    /// Comma-separated color specs, e.g. github.com=red
    #[arg(short = 'c', long = "color", value_name = "CSV")]
    pub color_spec: Option<String>,

    /// Comma-separated build tags to consider satisfied
    #[arg(long, value_name = "CSV")]
    pub tags: Option<String>,

    /// Lay out the dependency graph horizontally instead of vertically
    #[arg(long)]
    pub horizontal: bool,

    /// Path to a TOML configuration file (default: ./godepgraph.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Resolve packages from a JSON manifest instead of running `go list`
    #[arg(long, value_name = "FILE", env = "GODEPGRAPH_MANIFEST")]
    pub manifest: Option<String>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Single-dash long flags accepted for compatibility with the Go tool.
const GO_STYLE_LONG_FLAGS: [&str; 2] = ["tags", "horizontal"];

/// Rewrite `-tags`, `-tags=...` and `-horizontal` to their `--` forms.
///
/// Everything after a bare `--` is left alone.
#[must_use]
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        let arg: String = arg.into();
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let rewritten = arg
            .strip_prefix('-')
            .filter(|rest| !rest.starts_with('-'))
            .filter(|rest| {
                let name = rest.split_once('=').map_or(*rest, |(n, _)| n);
                GO_STYLE_LONG_FLAGS.contains(&name)
            })
            .map(|rest| format!("--{rest}"));
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse_from(normalize_args(std::env::args()))
}
