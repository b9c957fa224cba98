//! Internal helpers shared by the tools. Not part of the public API.

pub mod fs_utils;
pub mod progress;
