//! algoview CLI
//!
//! Records traversal traces and checks red-black trees.
//!
//! Usage:
//!   algoview run <graph.json> <dfs|bfs|dijkstra> <start> [--undirected] [--json]
//!   algoview tree <tree.json> [--json]
//!   algoview insert <value>...
//!   algoview clear
//!   algoview show

use std::path::PathBuf;
use std::process;

use algoview_graph::Graph;
use algoview_search::{Algorithm, Snapshot, Trace};
use algoview_session::{FileStore, SessionConfig, TreeSession};
use algoview_tree::{RuleReport, Tree};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Bad command line. Reported together with the usage text.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct UsageError(String);

/// Split `args` into positionals and flags, rejecting flags not in `known`.
fn split_flags<'a>(
    args: &'a [String],
    known: &[&str],
) -> Result<(Vec<&'a str>, Vec<&'a str>), UsageError> {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    for arg in args {
        if !arg.starts_with("--") {
            positional.push(arg.as_str());
        } else if known.contains(&arg.as_str()) {
            flags.push(arg.as_str());
        } else {
            return Err(UsageError(format!("unknown flag {}", arg)));
        }
    }
    Ok((positional, flags))
}

fn print_usage() {
    eprintln!("algoview - Step through graph searches and red-black trees");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  algoview run <graph.json> <algorithm> <start>  Record a trace (dfs, bfs, dijkstra)");
    eprintln!("      --undirected                               Treat edges as undirected");
    eprintln!("      --json                                     Print the trace as JSON");
    eprintln!("  algoview tree <tree.json>                      Check the red-black rules");
    eprintln!("      --json                                     Print the rule report as JSON");
    eprintln!("  algoview insert <value>...                     Insert into the stored tree");
    eprintln!("  algoview clear                                 Empty the stored tree");
    eprintln!("  algoview show                                  Check the stored tree");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ALGOVIEW_DATA             Store directory (default: ./algoview-data)");
    eprintln!("  ALGOVIEW_DIRECTED         Default directedness (default: true)");
    eprintln!("  ALGOVIEW_NEW_NODE_COLOR   Color of inserted nodes (default: red)");
    eprintln!("  RUST_LOG                  Log filter (default: algoview=info)");
}

fn data_dir() -> PathBuf {
    std::env::var("ALGOVIEW_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./algoview-data"))
}

fn format_snapshot(index: usize, snapshot: &Snapshot) -> String {
    let mut line = format!(
        "{:>3}  visited [{}]  frontier [{}]",
        index,
        snapshot.visited.join(" "),
        snapshot.frontier.join(" ")
    );
    if let Some(active) = &snapshot.active {
        line.push_str(&format!("  at {}", active));
    }
    if let Some((a, b)) = &snapshot.highlighted_edge {
        line.push_str(&format!("  edge {}-{}", a, b));
    }
    if let Some(distances) = &snapshot.distances {
        let shown: Vec<String> = distances
            .iter()
            .map(|(node, d)| {
                if d.is_finite() {
                    format!("{}={}", node, d)
                } else {
                    format!("{}=inf", node)
                }
            })
            .collect();
        line.push_str(&format!("  dist {{{}}}", shown.join(" ")));
    }
    line
}

fn print_trace(algorithm: Algorithm, trace: &Trace) {
    println!("{} from {}", algorithm, trace.start());
    for (i, snapshot) in trace.snapshots().iter().enumerate() {
        println!("{}", format_snapshot(i, snapshot));
    }
    println!("visit order: {}", trace.visit_order().join(" "));
}

fn print_report(tree: &Tree, report: &RuleReport) {
    println!("nodes: {}, height: {}", tree.len(), tree.height());
    println!("in-order: {:?}", tree.inorder_values());
    for row in tree.layout() {
        println!(
            "{}{} ({})",
            "  ".repeat(row.depth),
            row.value,
            row.color
        );
    }
    if report.is_valid() {
        println!("valid red-black tree");
    } else {
        for rule in report.violations() {
            println!("violated: {}", rule.description());
        }
    }
}

fn cmd_run(args: &[String]) -> CliResult<()> {
    let (positional, flags) = split_flags(args, &["--undirected", "--json"])?;
    let [path, algorithm, start] = positional.as_slice() else {
        return Err(UsageError("run requires <graph.json> <algorithm> <start>".into()).into());
    };
    let undirected = flags.contains(&"--undirected");
    let as_json = flags.contains(&"--json");

    let directed = SessionConfig::from_env().directed && !undirected;
    let algorithm: Algorithm = algorithm.parse()?;
    let text = std::fs::read_to_string(path)?;
    let graph = Graph::from_json(&text, directed)?;
    let trace = algorithm.run(&graph, start)?;

    if as_json {
        println!("{}", trace.to_json()?);
    } else {
        print_trace(algorithm, &trace);
    }
    Ok(())
}

fn cmd_tree(args: &[String]) -> CliResult<()> {
    let (positional, flags) = split_flags(args, &["--json"])?;
    let [path] = positional.as_slice() else {
        return Err(UsageError("tree requires <tree.json>".into()).into());
    };
    let as_json = flags.contains(&"--json");
    let config = SessionConfig::from_env();
    let text = std::fs::read_to_string(path)?;
    let tree = Tree::from_json(&text, config.new_node_color)?;
    let report = tree.validate();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&tree, &report);
    }
    Ok(())
}

fn open_stored() -> CliResult<TreeSession<FileStore>> {
    let store = FileStore::open(data_dir())?;
    let session = TreeSession::open(SessionConfig::from_env(), store)?;
    if let Some(e) = session.load_error() {
        eprintln!("Warning: stored tree was unreadable, starting empty: {}", e);
    }
    Ok(session)
}

fn cmd_insert(args: &[String]) -> CliResult<()> {
    if args.is_empty() {
        return Err(UsageError("insert requires at least one value".into()).into());
    }
    let values = args
        .iter()
        .map(|a| a.parse::<i64>().map_err(|e| format!("invalid value {}: {}", a, e)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = open_stored()?;
    for value in values {
        session.insert(value)?;
    }
    print_report(session.tree(), &session.validate());
    Ok(())
}

fn cmd_clear() -> CliResult<()> {
    let mut session = open_stored()?;
    session.clear()?;
    println!("stored tree cleared");
    Ok(())
}

fn cmd_show() -> CliResult<()> {
    let session = open_stored()?;
    print_report(session.tree(), &session.validate());
    Ok(())
}

fn main() {
    algoview_logging::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    tracing::debug!("Running {}", args[1..].join(" "));

    let rest = &args[2..];
    let result = match args[1].as_str() {
        "run" => cmd_run(rest),
        "tree" => cmd_tree(rest),
        "insert" => cmd_insert(rest),
        "clear" => cmd_clear(),
        "show" => cmd_show(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if e.is::<UsageError>() {
            print_usage();
        }
        process::exit(1);
    }
}
