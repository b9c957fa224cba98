//! Acquire helpers: getting remote files onto disk.

pub mod download;

pub use download::{Fetched, fetch_to_file};
