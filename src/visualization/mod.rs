use crate::filter::FilterEngine;
use crate::graph::walker::WalkOptions;
use crate::graph::DiscoverySession;
use crate::rewrite::Rewriter;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankDir {
    /// Graphviz default; no statement is emitted.
    #[default]
    TB,
    LR,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DotOptions {
    pub rankdir: RankDir,
    pub walk: WalkOptions,
}

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Render the packages held by `session` as a DOT digraph.
    ///
    /// Nodes come out in lexicographic path order; each node is followed by its
    /// outgoing edges in import order. Node IDs are taken from `session.ids`, so
    /// every registry key gets an ID before visibility is checked.
    pub fn generate_dot(
        &self,
        session: &mut DiscoverySession,
        filter: &FilterEngine,
        rewriter: &Rewriter,
        opts: DotOptions,
    ) -> String {
        let DiscoverySession { packages, ids } = session;
        let mut s = String::new();
        s.push_str("digraph godep {\n");
        if opts.rankdir == RankDir::LR {
            s.push_str("rankdir=\"LR\"\n");
        }

        for path in packages.sorted_paths() {
            let Some(pkg) = packages.get(path) else { continue };
            let id = ids.id_for(path);
            if !filter.is_visible(pkg) {
                continue;
            }

            let color = rewriter.rewrite_color(path, Rewriter::default_color(pkg));
            let _ = writeln!(
                s,
                "_{id} [label=\"{}\" style=\"filled\" color=\"{}\"];",
                escape_label(&rewriter.rewrite_name(path)),
                escape_label(&color)
            );

            if pkg.goroot && !opts.walk.delve_goroot {
                continue;
            }
            for imp in pkg.imports(opts.walk.include_tests) {
                let Some(target) = packages.get(&imp) else { continue };
                if !filter.is_visible(target) {
                    continue;
                }
                let _ = writeln!(s, "_{id} -> _{};", ids.id_for(&imp));
            }
        }
        s.push_str("}\n");
        s
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
