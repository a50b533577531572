//! Example that reads an edge-list file (or stdin) and prints the depth-first
//! order, breadth-first order and shortest paths from a start vertex.
//!
//! Usage:
//!   cargo run --example graph_report -- path/to/graph.txt --start A
//!   cat path/to/graph.txt | cargo run --example graph_report -- --start A
//!   cargo run --example graph_report -- - --start A --strategy greedy

use std::io::{self, BufReader};
use std::process;

use clap::{Parser, ValueEnum};
use weighted_digraph::{Graph, LoadError, ShortestPathStrategy};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Dijkstra's algorithm.
    Dijkstra,
    /// Once-per-vertex depth-first relaxation.
    Greedy,
}

impl From<Strategy> for ShortestPathStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Dijkstra => ShortestPathStrategy::Dijkstra,
            Strategy::Greedy => ShortestPathStrategy::GreedyRelaxation,
        }
    }
}

/// Read an edge list and report traversals and shortest paths.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input edge-list path (use '-' or omit to read from stdin)
    input: Option<String>,

    /// Label of the vertex to start from
    #[arg(long, short)]
    start: String,

    /// How to compute shortest paths
    #[arg(long, value_enum, default_value_t = Strategy::Dijkstra)]
    strategy: Strategy,

    /// Log skipped edges and other details to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    {
        use weighted_digraph::tracing_support::{LevelFilter, init_tracing_with_level};
        init_tracing_with_level(if args.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        });
    }
    #[cfg(not(feature = "tracing"))]
    let _ = args.verbose;

    let mut graph = match load(args.input.as_deref()) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("Invalid edge list: {err}");
            process::exit(1);
        }
    };

    println!("Vertices: {}", graph.num_vertices());
    println!("Edges: {}", graph.num_edges());
    if !graph.contains_vertex(&args.start) {
        eprintln!("No vertex labelled '{}'", args.start);
        process::exit(1);
    }

    println!("DFS: {}", graph.dfs(&args.start).join(" "));
    println!("BFS: {}", graph.bfs(&args.start).join(" "));
    let paths = graph.shortest_paths_with(&args.start, args.strategy.into());
    println!("Shortest paths ({:?}): {paths}", args.strategy);
}

fn load(input: Option<&str>) -> Result<Graph, LoadError> {
    match input {
        Some("-") | None => Graph::read_edge_list(BufReader::new(io::stdin())),
        Some(path) => Graph::from_edge_list_file(path),
    }
}
