//! qarchive-install - fetch the QArchive sources from GitHub
//!
//! Usage:
//!   qarchive-install                       Install QArchive into ./QArchive
//!   qarchive-install -d pkg.toml -C vendor Install another descriptor elsewhere
//!
//! WARNING: every directory the descriptor declares is deleted and recreated
//! without confirmation.

use anyhow::Result;
use clap::Parser;
use qarchive_tools::installer::{
    InstallOptions, PackageDescriptor, RAW_CONTENT_BASE, install_package,
};
use qarchive_tools::output;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qarchive-install")]
#[command(about = "Download the QArchive sources from GitHub")]
#[command(version)]
struct Cli {
    /// Package descriptor (TOML) to install instead of the built-in QArchive one
    #[arg(short, long)]
    descriptor: Option<PathBuf>,

    /// Host serving raw repository files
    #[arg(long, env = "QARCHIVE_INSTALL_BASE_URL", default_value = RAW_CONTENT_BASE)]
    base_url: String,

    /// Directory to install into
    #[arg(short = 'C', long, env = "QARCHIVE_INSTALL_DEST", default_value = ".")]
    dest: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let descriptor = match &cli.descriptor {
        Some(path) => PackageDescriptor::load(path)?,
        None => PackageDescriptor::qarchive(),
    };

    if cli.base_url != RAW_CONTENT_BASE {
        output::warning(&format!("fetching from {} instead of GitHub", cli.base_url));
    }

    let options = InstallOptions {
        base_url: cli.base_url,
        dest: cli.dest,
    };

    let report = install_package(&descriptor, &options)?;

    for file in &report.files {
        output::detail(&format!("{}  {}", file.sha256, file.local.display()));
    }
    output::info(&format!(
        "Thank you for choosing {} ({} files, {} bytes)",
        report.package,
        report.files.len(),
        report.total_bytes()
    ));

    Ok(())
}
