//! Filesystem and network helpers used by the installer.

pub mod acquire;
pub(crate) mod internal;
