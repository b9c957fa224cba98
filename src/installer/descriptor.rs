//! Package descriptors: which remote files land at which local paths.

use crate::helpers::internal::fs_utils::is_safe_path;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const QARCHIVE_OWNER: &str = "antony-jr";
const QARCHIVE_REPO: &str = "QArchive";
const QARCHIVE_BRANCH: &str = "master";
const QARCHIVE_DIRECTORIES: &[&str] = &["QArchive"];

/// (remote path in the repository, local path on disk)
const QARCHIVE_FILES: &[(&str, &str)] = &[
    ("QArchive.hpp", "QArchive/QArchive.hpp"),
    ("LICENSE", "QArchive/LICENSE"),
];

fn default_branch() -> String {
    QARCHIVE_BRANCH.to_string()
}

/// Errors found while validating a descriptor.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("descriptor field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("descriptor declares no files to install")]
    NoFiles,

    #[error("unsafe directory (empty, `.`, absolute or contains ..): {}", .0.display())]
    UnsafeDirectory(PathBuf),

    #[error("unsafe local path (empty, `.`, absolute or contains ..): {}", .0.display())]
    UnsafeLocalPath(PathBuf),

    #[error("empty remote path for local file {}", .0.display())]
    EmptyRemote(PathBuf),
}

/// One file to install.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileMapping {
    /// Path relative to the repository root on the branch.
    pub remote: String,
    /// Path relative to the install destination.
    pub local: PathBuf,
}

/// A GitHub repository plus the files to take from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDescriptor {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Directories recreated (emptied) before any download.
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    #[serde(default)]
    pub files: Vec<FileMapping>,
}

impl PackageDescriptor {
    /// The built-in QArchive descriptor: the single header plus its license.
    pub fn qarchive() -> Self {
        Self {
            owner: QARCHIVE_OWNER.to_string(),
            repo: QARCHIVE_REPO.to_string(),
            branch: default_branch(),
            directories: QARCHIVE_DIRECTORIES.iter().map(PathBuf::from).collect(),
            files: QARCHIVE_FILES
                .iter()
                .map(|(remote, local)| FileMapping {
                    remote: remote.to_string(),
                    local: PathBuf::from(local),
                })
                .collect(),
        }
    }

    /// Parse and validate a descriptor from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let descriptor: Self = toml::from_str(text).context("invalid package descriptor")?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Load and validate a descriptor file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read descriptor {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Reject descriptors that would write outside the install destination.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        for (name, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("branch", &self.branch),
        ] {
            if value.trim().is_empty() {
                return Err(DescriptorError::EmptyField(name));
            }
        }

        if self.files.is_empty() {
            return Err(DescriptorError::NoFiles);
        }

        if let Some(dir) = self.directories.iter().find(|d| !is_safe_path(d)) {
            return Err(DescriptorError::UnsafeDirectory(dir.clone()));
        }

        for file in &self.files {
            if !is_safe_path(&file.local) {
                return Err(DescriptorError::UnsafeLocalPath(file.local.clone()));
            }
            if file.remote.trim_matches('/').is_empty() {
                return Err(DescriptorError::EmptyRemote(file.local.clone()));
            }
        }

        Ok(())
    }

    /// Raw-content URL of `remote` on this descriptor's branch.
    pub fn raw_url(&self, base_url: &str, remote: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            remote.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qarchive_descriptor_is_valid() {
        let d = PackageDescriptor::qarchive();
        assert_eq!(d.validate(), Ok(()));
        assert_eq!(d.directories, vec![PathBuf::from("QArchive")]);
        assert_eq!(d.files.len(), 2);
        assert_eq!(d.files[0].remote, "QArchive.hpp");
        assert_eq!(d.files[0].local, PathBuf::from("QArchive/QArchive.hpp"));
    }

    #[test]
    fn test_raw_url() {
        let d = PackageDescriptor::qarchive();
        assert_eq!(
            d.raw_url("https://raw.githubusercontent.com", "QArchive.hpp"),
            "https://raw.githubusercontent.com/antony-jr/QArchive/master/QArchive.hpp"
        );
    }

    #[test]
    fn test_raw_url_normalizes_slashes() {
        let d = PackageDescriptor::qarchive();
        assert_eq!(
            d.raw_url("http://127.0.0.1:8080/", "/LICENSE"),
            "http://127.0.0.1:8080/antony-jr/QArchive/master/LICENSE"
        );
    }

    #[test]
    fn test_from_toml_defaults_branch() {
        let d = PackageDescriptor::from_toml_str(
            r#"
owner = "someone"
repo = "lib"
directories = ["vendor/lib"]

[[files]]
remote = "include/lib.hpp"
local = "vendor/lib/lib.hpp"
"#,
        )
        .unwrap();

        assert_eq!(d.branch, "master");
        assert_eq!(d.directories, vec![PathBuf::from("vendor/lib")]);
        assert_eq!(d.files[0].remote, "include/lib.hpp");
    }

    #[test]
    fn test_from_toml_rejects_traversal() {
        let err = PackageDescriptor::from_toml_str(
            r#"
owner = "someone"
repo = "lib"

[[files]]
remote = "lib.hpp"
local = "../outside.hpp"
"#,
        )
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DescriptorError>(),
            Some(&DescriptorError::UnsafeLocalPath(PathBuf::from("../outside.hpp")))
        );
    }

    #[test]
    fn test_validate_rejects_absolute_directory() {
        let mut d = PackageDescriptor::qarchive();
        d.directories.push(PathBuf::from("/etc"));
        assert_eq!(
            d.validate(),
            Err(DescriptorError::UnsafeDirectory(PathBuf::from("/etc")))
        );
    }

    #[test]
    fn test_validate_rejects_install_root_as_directory() {
        for root in [".", "./"] {
            let mut d = PackageDescriptor::qarchive();
            d.directories = vec![PathBuf::from(root)];
            assert_eq!(
                d.validate(),
                Err(DescriptorError::UnsafeDirectory(PathBuf::from(root))),
                "directory {:?} must be rejected",
                root
            );
        }
    }

    #[test]
    fn test_validate_rejects_no_files() {
        let mut d = PackageDescriptor::qarchive();
        d.files.clear();
        assert_eq!(d.validate(), Err(DescriptorError::NoFiles));
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut d = PackageDescriptor::qarchive();
        d.owner = "  ".to_string();
        assert_eq!(d.validate(), Err(DescriptorError::EmptyField("owner")));
    }

    #[test]
    fn test_validate_rejects_empty_remote() {
        let mut d = PackageDescriptor::qarchive();
        d.files[1].remote = "/".to_string();
        assert_eq!(
            d.validate(),
            Err(DescriptorError::EmptyRemote(PathBuf::from("QArchive/LICENSE")))
        );
    }
}
