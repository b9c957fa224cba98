//! release-check - decide whether a commit requests a new release
//!
//! Usage:
//!   release-check <COMMIT_MESSAGE> <TAGS_FILE>
//!
//! Prints the lowercased version from a `[Release <version>]` marker, or
//! `false` when there is nothing new to release. Exits with -1 on bad usage.

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use qarchive_tools::release::check_release;
use std::path::PathBuf;

const USAGE_EXIT_CODE: i32 = -1;

#[derive(Parser)]
#[command(name = "release-check")]
#[command(about = "Print the version a commit message asks to release, or `false`")]
#[command(version)]
struct Cli {
    /// Git commit message to inspect (may start with `-`)
    #[arg(allow_hyphen_values = true)]
    message: String,

    /// File holding the output of `git tag`, one tag per line
    tags: PathBuf,

    /// Anything after the tag file is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    _ignored: Vec<String>,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    let result = check_release(&cli.message, &cli.tags)?;
    println!("{}", result);
    Ok(())
}
