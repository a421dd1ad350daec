//! Print the OpenAPI document as JSON.

use std::path::PathBuf;

use clap::Parser;
use events_backend::ApiDoc;
use utoipa::OpenApi;

/// Dump the REST API's OpenAPI document.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Args {
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
    /// Write to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let json = if args.pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
    .map_err(std::io::Error::other)?;

    match args.output {
        Some(path) => std::fs::write(path, json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
