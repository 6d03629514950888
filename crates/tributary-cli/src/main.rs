//! Tributary CLI - ETL lineage and impact analysis
//!
//! This is the entry point for operators exploring a mapping table
//! from the terminal. It loads the data, answers trace queries, and
//! emits the JSON payload the interactive renderer consumes.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tributary_core::NodeKind;
use tributary_graph::{Direction, EdgeModel};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "tributary")]
#[command(author = "Tributary Contributors")]
#[command(version)]
#[command(about = "Lineage and impact analysis over ETL mapping tables", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the mapping rows come from. Flags override the optional
/// `.tributary/config.json`.
#[derive(Args)]
struct DataArgs {
    /// Combined mapping table (source, job, target columns)
    #[arg(long)]
    mappings: Option<PathBuf>,

    /// Sources-to-jobs table (requires --targets)
    #[arg(long, requires = "targets")]
    sources: Option<PathBuf>,

    /// Jobs-to-targets table (requires --sources)
    #[arg(long, requires = "sources")]
    targets: Option<PathBuf>,

    /// Edge model: direct or two-hop (defaults to direct for
    /// --mappings, two-hop for --sources/--targets)
    #[arg(long)]
    model: Option<EdgeModel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace dependencies from a node
    Trace {
        /// The table or job to start from
        node: String,

        /// Traversal direction: downstream, upstream, or both
        #[arg(short, long, default_value = "downstream")]
        direction: Direction,

        /// Maximum traversal depth (default: unbounded)
        #[arg(short = 'L', long)]
        depth: Option<usize>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        data: DataArgs,
    },

    /// List every node with its kind
    Nodes {
        /// Only show nodes of this kind: job or table
        #[arg(short, long)]
        kind: Option<NodeKind>,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Export the full graph and row table to JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = "lineage-graph.json")]
        output: PathBuf,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Show dataset and graph statistics
    Info {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Write a default .tributary/config.json
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Trace {
            node,
            direction,
            depth,
            json,
            data,
        } => commands::trace(&node, direction, depth, json, &data),
        Commands::Nodes { kind, data } => commands::nodes(kind, &data),
        Commands::Export { output, data } => commands::export(&output, &data),
        Commands::Info { data } => commands::info(&data),
        Commands::Init { path } => commands::init(&path),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
