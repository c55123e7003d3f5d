//! Lineage graph generator CLI.
//!
//! Provides the `mapflow` binary. The `generate` subcommand reads a compiled
//! mapping configuration (JSON), builds its field-lineage graph, prints the
//! DOT rendering to stdout and optionally writes the wire-format protobuf
//! and the DOT text to files. Any build error prints to stderr and exits
//! non-zero; a successful run exits zero.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use mapflow_build::{build, DEFAULT_BUILTINS};
use mapflow_ir::MappingConfig;

mod dot;

/// Field-lineage graph generator for compiled mapping configurations.
#[derive(Parser)]
#[command(name = "mapflow", about = "Field-lineage graph generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the lineage graph of a compiled mapping configuration.
    Generate {
        /// Path to the compiled mapping configuration (JSON).
        #[arg(short, long)]
        mapping: PathBuf,

        /// Write the wire-format graph to this path.
        #[arg(long)]
        proto_out: Option<PathBuf>,

        /// Write the DOT text to this path.
        #[arg(long)]
        dot_out: Option<PathBuf>,

        /// Do not print the DOT text to stdout.
        #[arg(long)]
        quiet: bool,
    },

    /// Build graphs for every compiled mapping (*.json) in a directory.
    Batch {
        /// Directory containing compiled mapping configurations.
        #[arg(short, long)]
        dir: PathBuf,

        /// Directory for the generated .dot and .pb files (defaults to the
        /// input directory).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            mapping,
            proto_out,
            dot_out,
            quiet,
        } => {
            let exit_code = run_generate(&mapping, proto_out.as_deref(), dot_out.as_deref(), quiet);
            process::exit(exit_code);
        }
        Commands::Batch { dir, out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| dir.clone());
            process::exit(run_batch(&dir, &out_dir));
        }
    }
}

fn run_batch(dir: &std::path::Path, out_dir: &std::path::Path) -> i32 {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("failed to read {}: {err}", dir.display());
            return 1;
        }
    };
    if let Err(err) = fs::create_dir_all(out_dir) {
        eprintln!("failed to create {}: {err}", out_dir.display());
        return 1;
    }

    let mut failures = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };
        tracing::info!(file = %path.display(), "processing mapping");
        let proto_out = out_dir.join(format!("{stem}.pb"));
        let dot_out = out_dir.join(format!("{stem}.dot"));
        if run_generate(&path, Some(&proto_out), Some(&dot_out), true) != 0 {
            eprintln!("failed to process {}", path.display());
            failures += 1;
        }
    }
    if failures == 0 {
        0
    } else {
        1
    }
}

fn run_generate(
    mapping: &std::path::Path,
    proto_out: Option<&std::path::Path>,
    dot_out: Option<&std::path::Path>,
    quiet: bool,
) -> i32 {
    let text = match fs::read_to_string(mapping) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read {}: {err}", mapping.display());
            return 1;
        }
    };

    let config: MappingConfig = match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to parse {}: {err}", mapping.display());
            return 1;
        }
    };

    let graph = match build(&config, DEFAULT_BUILTINS) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("graph construction failed: {err}");
            return 1;
        }
    };
    if let Err(err) = graph.validate() {
        eprintln!("graph integrity check failed: {err}");
        return 1;
    }
    tracing::info!(nodes = graph.nodes.len(), "graph built");

    let dot_text = dot::to_dot(&graph);
    if !quiet {
        println!("{dot_text}");
    }

    if let Some(path) = dot_out {
        if let Err(err) = fs::write(path, &dot_text) {
            eprintln!("failed to write {}: {err}", path.display());
            return 1;
        }
    }

    if let Some(path) = proto_out {
        let bytes = mapflow_wire::encode(&graph);
        if let Err(err) = fs::write(path, bytes) {
            eprintln!("failed to write {}: {err}", path.display());
            return 1;
        }
    }

    0
}
