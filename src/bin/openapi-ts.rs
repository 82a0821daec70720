//! openapi-ts CLI
//!
//! Command-line interface for generating TypeScript declarations from
//! OpenAPI documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use openapi_ts::{generate, load_document, GeneratorOptions};

#[derive(Parser)]
#[command(name = "openapi-ts")]
#[command(about = "Generate TypeScript request/response types from an OpenAPI document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript declarations from a document
    Generate {
        /// OpenAPI document: a YAML or JSON file
        document: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Prefix for generated type names
        #[arg(long, default_value = "API")]
        type_prefix: String,

        /// Render JSON bodies as JSONString<T> wrappers
        #[arg(long)]
        json_string_bodies: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            document,
            output,
            type_prefix,
            json_string_bodies,
        } => run_generate(&document, output, type_prefix, json_string_bodies),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_generate(
    document_path: &std::path::Path,
    output: Option<PathBuf>,
    type_prefix: String,
    json_string_bodies: bool,
) -> Result<(), u8> {
    let document = load_document(document_path).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let options = GeneratorOptions::new()
        .type_prefix(type_prefix)
        .json_string_bodies(json_string_bodies);

    let code = generate(&document, &options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &code).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", code);
        }
    }

    Ok(())
}
