//! Print the OpenAPI document as JSON for client generators.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use recipe_book::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the recipe book OpenAPI document as pretty-printed JSON",
    version
)]
struct CliArgs {
    /// Write to this file instead of standard output.
    #[arg(long = "output", short = 'o', value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let document = ApiDoc::openapi().to_pretty_json()?;
    match args.output {
        Some(path) => fs::write(path, format!("{document}\n"))?,
        None => writeln!(std::io::stdout().lock(), "{document}")?,
    }
    Ok(())
}
