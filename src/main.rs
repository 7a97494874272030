use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use topograph::{
    algorithms::{dfs_order, kahn_levels, kahn_order, max_depth_checked_of, TopoError},
    graph::{AdjacencyRelation, NodeIndex, Position},
    input::{read_edges, read_nodes},
    union_find::DisjointSet,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "topograph",
    version,
    about = "Order, measure and cluster the graph described by a node file and an edge file."
)]
struct Cli {
    /// Log at debug level (overridden by TOPOGRAPH_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Node file: one identifier per line. Edge file: `source<TAB>target` per
/// line. Lines starting with `#` are ignored in both.
#[derive(clap::Args, Debug)]
struct GraphFiles {
    /// File listing the nodes.
    #[arg(value_name = "NODES")]
    nodes: PathBuf,
    /// File listing the edges.
    #[arg(value_name = "EDGES")]
    edges: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the nodes in topological order, sinks first.
    Sort {
        #[command(flatten)]
        files: GraphFiles,
        #[arg(short, long, value_enum, default_value_t = SortAlgorithm::Kahn)]
        algorithm: SortAlgorithm,
    },
    /// Print the length of the longest path ending at START.
    Depth {
        #[command(flatten)]
        files: GraphFiles,
        /// Node whose incoming paths are measured.
        start: String,
    },
    /// Print the connected components of the graph, ignoring edge direction.
    Components {
        #[command(flatten)]
        files: GraphFiles,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SortAlgorithm {
    /// Kahn's algorithm.
    Kahn,
    /// Kahn's algorithm, printing the wave of every node.
    Levels,
    /// Depth-first search.
    Dfs,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TOPOGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "topograph=debug,info"
        } else {
            "topograph=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn load(files: &GraphFiles) -> Result<(NodeIndex, AdjacencyRelation)> {
    let nodes = read_nodes(open(&files.nodes)?)
        .with_context(|| format!("failed to read nodes from {}", files.nodes.display()))?;
    let edges = read_edges(open(&files.edges)?)
        .with_context(|| format!("failed to read edges from {}", files.edges.display()))?;

    let index = NodeIndex::intern(nodes);
    let relation = AdjacencyRelation::build(&index, edges.iter().map(|(a, b)| (a, b)))
        .with_context(|| format!("invalid edge in {}", files.edges.display()))?;

    info!(
        nodes = index.len(),
        edges = relation.edge_count(),
        "loaded graph"
    );
    Ok((index, relation))
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    execute(cli.command, &mut out)?;
    out.flush()?;
    Ok(())
}

fn execute(command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Sort { files, algorithm } => {
            let (index, mut relation) = load(&files)?;
            match algorithm {
                SortAlgorithm::Kahn => {
                    let order = kahn_order(&relation)
                        .map_err(|err| explain(&index, err))
                        .context("graph is not acyclic")?;
                    for id in index.identifiers(&order) {
                        writeln!(out, "{id}")?;
                    }
                }
                SortAlgorithm::Levels => {
                    let levels = kahn_levels(&relation)
                        .map_err(|err| explain(&index, err))
                        .context("graph is not acyclic")?;
                    for l in levels {
                        writeln!(out, "{}\t{}", l.level, index.identifier_at(l.node))?;
                    }
                }
                SortAlgorithm::Dfs => {
                    let order = dfs_order(&mut relation)
                        .map_err(|err| explain(&index, err))
                        .context("graph is not acyclic")?;
                    for id in index.identifiers(&order) {
                        writeln!(out, "{id}")?;
                    }
                }
            }
        }
        Command::Depth { files, start } => {
            let (index, relation) = load(&files)?;
            let depth = max_depth_checked_of(&index, &relation, &start)
                .map_err(|err| explain(&index, err))
                .with_context(|| format!("cannot measure the depth of {start:?}"))?;
            writeln!(out, "{depth}")?;
        }
        Command::Components { files } => {
            let (index, relation) = load(&files)?;
            let mut forest = DisjointSet::new(index.len());
            for (u, v) in relation.edges() {
                forest.union(u.0, v.0)?;
            }
            info!(components = forest.component_count(), "clustered graph");
            for component in forest.components() {
                let names = component
                    .into_iter()
                    .map(|i| index.identifier_at(i.into()))
                    .join("\t");
                writeln!(out, "{names}")?;
            }
        }
    }
    Ok(())
}

/// Restates an ordering failure with node identifiers in place of positions.
fn explain(index: &NodeIndex, err: TopoError) -> anyhow::Error {
    let edge = |(u, v): &(Position, Position)| {
        format!("{} -> {}", index.identifier_at(*u), index.identifier_at(*v))
    };
    match err {
        TopoError::NotAcyclic {
            remaining_edges,
            unresolved,
            ..
        } => anyhow!(
            "{remaining_edges} edges could not be ordered: {}",
            unresolved.iter().map(edge).join(", ")
        ),
        TopoError::CycleDetected { path, .. } => anyhow!(
            "cycle {}",
            path.iter()
                .chain(path.first())
                .map(|p| index.identifier_at(*p))
                .join(" -> ")
        ),
        TopoError::Graph(err) => err.into(),
    }
}
