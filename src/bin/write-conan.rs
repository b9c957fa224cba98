//! write-conan - write the Conan recipe for QArchive
//!
//! Reads BUILD_TYPE, STATIC_BUILD, QARCHIVE_VERSION and QT_VERSION from the
//! environment and writes `conanfile.py` in the current directory.

use anyhow::Result;
use clap::Parser;
use qarchive_tools::conan::{self, RecipeConfig};
use qarchive_tools::output;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "write-conan")]
#[command(about = "Write conanfile.py for QArchive from environment variables")]
#[command(version)]
struct Cli {
    /// Recipe file to write
    #[arg(short, long, default_value = conan::DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    output::action("Write Conan, writes conanfile.py for QArchive");

    let config = RecipeConfig::from_env();
    for line in config.summary() {
        println!("{}", line);
    }

    conan::write_recipe(&config, &cli.output)?;

    output::detail(&cli.output.display().to_string());
    output::success("File Written.");
    Ok(())
}
