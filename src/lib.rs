//! Build and release tooling for the QArchive C++ library
//!
//! Three independent single-shot tools share this crate:
//!
//! - `qarchive-install` downloads the QArchive sources from GitHub into a
//!   local directory ([`installer`]).
//! - `write-conan` writes a Conan `conanfile.py` configured from the
//!   environment ([`conan`]).
//! - `release-check` reads a commit message and the output of `git tag` and
//!   prints the version to release, or `false` ([`release`]).
//!
//! # Example
//!
//! ```no_run
//! use qarchive_tools::installer::{install_package, InstallOptions, PackageDescriptor};
//!
//! let report = install_package(&PackageDescriptor::qarchive(), &InstallOptions::default())?;
//! println!("{} bytes written", report.total_bytes());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod conan;
pub mod helpers;
pub mod installer;
pub mod output;
pub mod release;
