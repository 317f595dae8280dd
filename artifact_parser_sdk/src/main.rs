//! # Artifact Parse CLI
//!
//! Lists the bundled parsers or runs one over collected responses stored as
//! JSON, printing each parsed record as a JSON line.

use artifact_parser_base::contracts::ParserRegistry;
use artifact_parser_base::types::{CollectedResponse, HostContext, PathType};
use artifact_parser_base::RegistryConfig;
use artifact_parser_sdk::create_parser_registry;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "artifact-parse")]
#[command(about = "Parse collected forensic artifacts into records", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Registry configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered parsers
    List,

    /// Run one parser over a JSON array of collected responses
    Parse {
        /// Registered parser name
        #[arg(short, long)]
        parser: String,

        /// JSON file holding the collected responses
        #[arg(short, long)]
        responses: PathBuf,

        /// JSON file holding the host context
        #[arg(long)]
        host: Option<PathBuf>,

        /// Access method for follow-up file downloads
        #[arg(long, default_value = "os")]
        path_type: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::default(),
    };
    let registry = create_parser_registry(&config)?;

    match cli.command {
        Commands::List => list_parsers(&registry)?,
        Commands::Parse {
            parser,
            responses,
            host,
            path_type,
        } => {
            let failures = parse(&registry, &parser, &responses, host.as_deref(), &path_type)?;
            if failures > 0 {
                eprintln!("{} item(s) failed to parse", failures);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn list_parsers(registry: &ParserRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for descriptor in registry.descriptors() {
        let shapes: Vec<&str> = descriptor.accepted_shapes.iter().map(|s| s.as_str()).collect();
        writeln!(
            out,
            "{:<26} {:<16} [{}] {}",
            descriptor.name,
            descriptor.contract.as_str(),
            shapes.join(", "),
            descriptor.supported_artifacts.join(", ")
        )?;
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid JSON in '{}': {}", path.display(), e))?;
    Ok(value)
}

/// Returns the number of items that failed
fn parse(
    registry: &ParserRegistry,
    parser: &str,
    responses_path: &Path,
    host_path: Option<&Path>,
    path_type: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    let path_type = PathType::from_name(path_type)
        .ok_or_else(|| format!("Unknown path type: {}", path_type))?;
    let responses: Vec<CollectedResponse> = read_json(responses_path)?;
    let host: HostContext = match host_path {
        Some(path) => read_json(path)?,
        None => HostContext::default(),
    };

    log::info!(
        "Parsing {} response(s) from {} with '{}'",
        responses.len(),
        responses_path.display(),
        parser
    );

    let stream = registry.dispatch(parser, &host, &responses, path_type)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;

    for item in stream {
        match item {
            Ok(record) => writeln!(out, "{}", serde_json::to_string(&record)?)?,
            Err(e) => {
                failures += 1;
                eprintln!("[{}] {}", e.kind().as_str(), e);
            }
        }
    }

    Ok(failures)
}
