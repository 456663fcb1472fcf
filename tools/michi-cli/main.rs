use clap::{Parser, Subcommand};
use michi::prelude::*;
use std::fs;
use std::time::Instant;

/// Resolve, send and import node-based HTTP request graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the path ending at a node and print the composed URL
    Resolve {
        /// Path to the canvas JSON file
        canvas_path: String,
        /// Id of the terminal node
        target: String,
        /// Optional JSON object of variable bindings
        #[arg(long)]
        vars: Option<String>,
    },
    /// Assemble and send the request for a method node
    Send {
        /// Path to the canvas JSON file
        canvas_path: String,
        /// Id of the method node
        target: String,
        /// Optional JSON object of variable bindings
        #[arg(long)]
        vars: Option<String>,
        /// Optional session configuration JSON file
        #[arg(long)]
        config: Option<String>,
    },
    /// Import an OpenAPI / Swagger document (JSON or YAML)
    Import {
        /// Path to the API document
        document_path: String,
        /// Write the resulting graph as canvas JSON
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            canvas_path,
            target,
            vars,
        } => run_resolve(&canvas_path, &target, vars.as_deref()),
        Commands::Send {
            canvas_path,
            target,
            vars,
            config,
        } => run_send(&canvas_path, &target, vars.as_deref(), config.as_deref()),
        Commands::Import {
            document_path,
            out,
        } => run_import(&document_path, out.as_deref()),
    }
}

/// Loads the canvas and variables into a fresh session with `target` selected.
fn load_session(
    canvas_path: &str,
    target: &str,
    vars_path: Option<&str>,
    config: SessionConfig,
) -> Session {
    let canvas_json = fs::read_to_string(canvas_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read canvas file '{}': {}",
            canvas_path, e
        ))
    });
    let graph = CanvasDocument::from_json(&canvas_json)
        .and_then(IntoGraph::into_graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load canvas: {}", e)));

    let variables: VariableTable = match vars_path {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read variables file '{}': {}", path, e))
            });
            serde_json::from_str(&json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse variables JSON: {}", e))
            })
        }
        None => VariableTable::new(),
    };

    let mut session = Session::builder().with_config(config).build();
    let commands = std::iter::once(Command::ReplaceGraph(graph))
        .chain(
            variables.iter().map(|(name, value)| Command::SetVariable {
                name: name.to_string(),
                value: value.to_string(),
            }),
        )
        .chain(std::iter::once(Command::SetActivePath(Some(NodeId::from(
            target,
        )))));
    for command in commands {
        session
            .apply(command)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to apply command: {}", e)));
    }
    session
}

fn run_resolve(canvas_path: &str, target: &str, vars_path: Option<&str>) {
    let start = Instant::now();
    let session = load_session(canvas_path, target, vars_path, SessionConfig::default());
    let active = session.active_path();

    if !active.is_resolved() {
        exit_with_error(&format!(
            "No base URL is reachable from node '{}'",
            target
        ));
    }

    println!(
        "Path: {}",
        PathFormatter::format_with_variables(session.graph(), active.path(), session.variables())
    );
    match session.computed_url() {
        Some(url) => println!("URL:  {}", url),
        None => exit_with_error("The resolved path has no base URL"),
    }
    println!("Resolved in {:?}", start.elapsed());
}

#[cfg(feature = "transport")]
fn run_send(canvas_path: &str, target: &str, vars_path: Option<&str>, config_path: Option<&str>) {
    use michi::request::UreqTransport;

    let config = match config_path {
        Some(path) => SessionConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", path, e))
        }),
        None => SessionConfig::default(),
    };
    let transport = UreqTransport::new(config.request_timeout());
    let mut session = load_session(canvas_path, target, vars_path, config);

    let Some(pending) = session.prepare_send() else {
        exit_with_error(&format!(
            "Nothing to send: node '{}' is not a method node with a resolvable URL",
            target
        ));
    };
    println!("{} {}", pending.request.method, pending.request.url);
    let response = dispatch(&transport, &pending.request);
    session.complete_send(pending, response.clone());

    if response.is_network_error() {
        println!(
            "  -> Network error: {}",
            response.error.as_deref().unwrap_or("unknown")
        );
    } else {
        println!(
            "  -> {} {} ({}ms)",
            response.status, response.status_text, response.elapsed_ms
        );
        match response.json() {
            Some(json) => println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or(response.data.clone())
            ),
            None => println!("{}", response.data),
        }
    }
}

#[cfg(not(feature = "transport"))]
fn run_send(_: &str, _: &str, _: Option<&str>, _: Option<&str>) {
    exit_with_error("This build has no HTTP transport; rebuild with `--features transport`.");
}

fn run_import(document_path: &str, out: Option<&str>) {
    let start = Instant::now();
    let text = fs::read_to_string(document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read API document '{}': {}",
            document_path, e
        ))
    });
    let (graph, stats) = import_document(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));

    println!("\n--- Import Summary ---");
    println!("Paths:      {}", stats.paths);
    println!("Operations: {}", stats.operations);
    println!("Nodes:      {}", stats.nodes);
    println!("Edges:      {}", stats.edges);
    println!("Elapsed:    {:?}", start.elapsed());

    if let Some(out_path) = out {
        let json = CanvasDocument::from_graph(&graph)
            .to_json()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode canvas: {}", e)));
        fs::write(out_path, json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write '{}': {}", out_path, e))
        });
        println!("Canvas written to '{}'", out_path);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
