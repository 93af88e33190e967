//! godepgraph: Go package dependency graphs
//!
//! Resolve the transitive imports of Go packages and emit the graph as Graphviz DOT.
//!
//! # Features
//! - Depth-first discovery with duplicate/cycle avoidance and a depth limit
//! - Include/exclude filtering by exact name, prefix, allow-list, or standard library
//! - Longest-prefix label and color rewriting
//! - Deterministic output (nodes sorted by import path)
//!
//! # Quickstart (Library)
//! ```no_run
//! use godepgraph::app::{render_graph, Settings};
//! use godepgraph::graph::resolver::GoListResolver;
//!
//! let settings = Settings { roots: vec![".".into()], ..Settings::default() };
//! let dot = render_graph(&settings, &GoListResolver::new(), std::path::Path::new("."))
//!     .expect("resolve graph");
//! print!("{dot}");
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! godepgraph -s -p golang.org/x github.com/acme/app | dot -Tpng -o deps.png
//! ```
pub mod app;
pub mod cli;
pub mod errors;
pub mod filter;
pub mod graph;
pub mod rewrite;
pub mod utils;
pub mod visualization;
