//! Source installer
//!
//! Recreates the directories a [`PackageDescriptor`] declares, then downloads
//! each declared file from the raw-content host and writes it verbatim.
//!
//! Directory policy: every declared directory is deleted before it is
//! recreated, whether it is an existing directory or a stray file of the same
//! name. Only declared directories are touched; parents of file paths that
//! are not declared are created on demand and left as they are.
//!
//! The run stops at the first failed request or write. Files downloaded
//! before the failure stay on disk.

mod descriptor;

pub use descriptor::{DescriptorError, FileMapping, PackageDescriptor};

use crate::helpers::acquire::fetch_to_file;
use crate::helpers::internal::fs_utils;
use crate::output;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Host serving raw repository files.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Where to fetch from and where to write to.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub base_url: String,
    /// Root that descriptor directories and local paths are relative to.
    pub dest: PathBuf,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            base_url: RAW_CONTENT_BASE.to_string(),
            dest: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledFile {
    pub local: PathBuf,
    pub url: String,
    pub bytes: u64,
    pub sha256: String,
}

/// Result of a completed installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub package: String,
    pub files: Vec<InstalledFile>,
}

impl InstallReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

/// Install every file of `descriptor` under `options.dest`.
pub fn install_package(
    descriptor: &PackageDescriptor,
    options: &InstallOptions,
) -> Result<InstallReport> {
    descriptor.validate()?;

    output::action(&format!("Installing {}", descriptor.repo));

    for dir in &descriptor.directories {
        output::sub_action(&format!("creating directory {}", dir.display()));
        fs_utils::recreate_dir(&options.dest.join(dir))?;
    }

    output::sub_action(&format!(
        "downloading {}/{}@{} from {}",
        descriptor.owner, descriptor.repo, descriptor.branch, options.base_url
    ));

    let total = descriptor.files.len();
    let mut files = Vec::with_capacity(total);

    for (i, mapping) in descriptor.files.iter().enumerate() {
        let url = descriptor.raw_url(&options.base_url, &mapping.remote);
        let dest = options.dest.join(&mapping.local);

        output::action_numbered(i + 1, total, &mapping.remote);
        let fetched = fetch_to_file(&url, &dest)
            .with_context(|| format!("failed to install {}", mapping.local.display()))?;
        output::detail(&format!(
            "wrote {} ({} bytes)",
            mapping.local.display(),
            fetched.bytes
        ));

        files.push(InstalledFile {
            local: mapping.local.clone(),
            url,
            bytes: fetched.bytes,
            sha256: fetched.sha256,
        });
    }

    output::success(&format!("{} installed", descriptor.repo));

    Ok(InstallReport {
        package: descriptor.repo.clone(),
        files,
    })
}
