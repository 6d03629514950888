//! CLI command implementations.

use crate::config::{Config, CONFIG_DIR, CONFIG_FILE};
use crate::DataArgs;
use colored::{ColoredString, Colorize};
use std::fs;
use std::path::Path;
use tracing::debug;
use tributary_core::{clean_records, load_mappings, load_split, EdgeRecord, NodeKind};
use tributary_graph::{
    build_graph, classify, job_names, render_payload, Direction, EdgeModel, LineageQuery,
    RenderPayload,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Resolves the input flags (falling back to config) into a cleaned
/// record table and the edge model to build with.
fn load_records(data: &DataArgs, config: &Config) -> Result<(Vec<EdgeRecord>, EdgeModel)> {
    let model_override = data.model.or(config.model);

    let (raw, default_model) = if let Some(path) = &data.mappings {
        (load_mappings(path)?, EdgeModel::Direct)
    } else if let (Some(sources), Some(targets)) = (&data.sources, &data.targets) {
        (load_split(sources, targets)?, EdgeModel::TwoHop)
    } else if let Some(path) = &config.mappings {
        (load_mappings(path)?, EdgeModel::Direct)
    } else if let (Some(sources), Some(targets)) = (&config.sources, &config.targets) {
        (load_split(sources, targets)?, EdgeModel::TwoHop)
    } else {
        return Err(format!(
            "no input data: pass --mappings FILE or --sources FILE --targets FILE, \
             or run {} and fill in {}/{}",
            "tributary init", CONFIG_DIR, CONFIG_FILE
        )
        .into());
    };

    let model = model_override.unwrap_or(default_model);
    let records = clean_records(raw, model.requires_target());
    debug!(records = records.len(), model = %model, "cleaned mapping table");

    Ok((records, model))
}

/// Trace dependencies from a node.
pub fn trace(
    node: &str,
    direction: Direction,
    depth: Option<usize>,
    json_output: bool,
    data: &DataArgs,
) -> Result<()> {
    let config = Config::load(Path::new("."));
    let (records, model) = load_records(data, &config)?;

    let mut query = LineageQuery::new(node).with_direction(direction);
    query.max_depth = depth.or(config.max_depth);

    let payload = render_payload(&records, model, &query);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if payload.edges.is_empty() {
        // A normal display state, not an error
        println!("{} no connections found for \"{}\"", "•".blue(), node);
        return Ok(());
    }

    let title = match direction {
        Direction::Downstream => "Impact of",
        Direction::Upstream => "Lineage of",
        Direction::Both => "Connections of",
    };
    let depth_note = match query.max_depth {
        Some(depth) => format!("depth {depth}"),
        None => "unbounded".to_string(),
    };
    println!(
        "{} {} ({}, {})",
        title.cyan().bold(),
        node.bold(),
        direction,
        depth_note
    );
    println!(
        "Total: {} nodes, {} edges",
        payload.nodes.len().to_string().cyan(),
        payload.edges.len().to_string().cyan()
    );
    println!();

    for edge in &payload.edges {
        println!(
            "  {} {} {}",
            style_node(&edge.from, &payload),
            "→".dimmed(),
            style_node(&edge.to, &payload)
        );
    }

    let jobs: Vec<&str> = payload
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Job)
        .map(|n| n.name.as_str())
        .collect();
    let tables: Vec<&str> = payload
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Table)
        .map(|n| n.name.as_str())
        .collect();

    println!();
    if !jobs.is_empty() {
        println!("{} {}", "Jobs:".dimmed(), jobs.join(", ").cyan());
    }
    if !tables.is_empty() {
        println!("{} {}", "Tables:".dimmed(), tables.join(", ").green());
    }

    println!();
    println!("{}", "Relevant mapping rows:".cyan());
    for row in &payload.rows {
        let target = if row.has_target() {
            row.target.as_str()
        } else {
            "-"
        };
        println!("  {} | {} | {}", row.source, row.job.yellow(), target);
    }

    Ok(())
}

/// Bolds the selected node and its one-hop neighbors.
fn style_node(name: &str, payload: &RenderPayload) -> ColoredString {
    let emphasized = payload.query.selected_node == name
        || payload.emphasized.iter().any(|n| n == name);
    if emphasized {
        name.bold()
    } else {
        name.normal()
    }
}

/// List every node with its kind.
pub fn nodes(kind_filter: Option<NodeKind>, data: &DataArgs) -> Result<()> {
    let config = Config::load(Path::new("."));
    let (records, model) = load_records(data, &config)?;
    let graph = build_graph(&records, model);
    let jobs = job_names(&records);

    let mut names: Vec<&str> = graph.node_names().collect();
    names.sort_unstable();

    let mut shown = 0;
    for name in names {
        let kind = classify(name, &jobs);
        if kind_filter.is_some_and(|filter| filter != kind) {
            continue;
        }
        let label = match kind {
            NodeKind::Job => "job  ".cyan(),
            NodeKind::Table => "table".green(),
        };
        println!("  {} {}", label, name);
        shown += 1;
    }

    println!();
    println!("{} nodes", shown.to_string().cyan());

    Ok(())
}

/// Export the full graph and row table to JSON for the renderer.
pub fn export(output: &Path, data: &DataArgs) -> Result<()> {
    let config = Config::load(Path::new("."));
    let (records, model) = load_records(data, &config)?;
    let graph = build_graph(&records, model);
    let jobs = job_names(&records);

    let nodes: Vec<_> = graph
        .node_names()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "kind": classify(name, &jobs),
            })
        })
        .collect();

    let export = serde_json::json!({
        "version": "1.0",
        "model": model,
        "stats": graph.stats(),
        "nodes": nodes,
        "edges": graph.export_edges(),
        "rows": records,
    });

    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}

/// Show dataset and graph statistics.
pub fn info(data: &DataArgs) -> Result<()> {
    let config = Config::load(Path::new("."));
    let (records, model) = load_records(data, &config)?;
    let graph = build_graph(&records, model);
    let jobs = job_names(&records);
    let job_count = graph.node_names().filter(|name| jobs.contains(*name)).count();

    println!("{}", "Tributary Status".cyan().bold());
    println!();
    println!("  {} {}", "Model:".dimmed(), model);
    println!("  {} {}", "Rows:".dimmed(), records.len());
    println!("  {} {}", "Nodes:".dimmed(), graph.node_count());
    println!("  {} {}", "Edges:".dimmed(), graph.edge_count());
    println!(
        "  {} {} jobs, {} tables",
        "Kinds:".dimmed(),
        job_count,
        graph.node_count() - job_count
    );

    Ok(())
}

/// Write a default config file.
pub fn init(path: &Path) -> Result<()> {
    let dir = path.join(CONFIG_DIR);

    if dir.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::create_dir_all(&dir)?;

    let config_path = dir.join(CONFIG_FILE);
    let default_config = serde_json::json!({
        "mappings": "mappings.csv",
        "model": "two-hop",
        "maxDepth": 3
    });

    fs::write(&config_path, serde_json::to_string_pretty(&default_config)?)?;

    println!("{} Initialized Tributary in {}", "✓".green(), path.display());
    println!(
        "  Edit {} then run {}",
        config_path.display(),
        "tributary trace <node>".cyan()
    );

    Ok(())
}
