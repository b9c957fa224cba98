//! Download helpers for fetching raw files
//!
//! The response body is written to disk byte for byte. There is no retry and
//! no integrity check; the SHA-256 digest is only reported back to the caller.

use anyhow::{Context, Result, bail};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::Path;

use super::super::internal::fs_utils;
use super::super::internal::progress::{self, upgrade_to_bytes};

/// What a completed download wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: u64,
    /// Lowercase hex SHA-256 of the bytes written.
    pub sha256: String,
}

/// Download `url` to `dest`, overwriting any existing file.
///
/// Parent directories of `dest` are created as needed. Non-2xx responses and
/// transport failures are errors.
///
/// # Example
/// ```ignore
/// let fetched = fetch_to_file(
///     "https://raw.githubusercontent.com/antony-jr/QArchive/master/LICENSE",
///     Path::new("QArchive/LICENSE"),
/// )?;
/// ```
pub fn fetch_to_file(url: &str, dest: &Path) -> Result<Fetched> {
    fs_utils::ensure_parent_dir(dest)?;

    let filename = dest
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "download".to_string());

    let pb = progress::create_spinner(&format!("downloading {}", filename));
    let result = download_with_progress(url, dest, &pb);
    pb.finish_and_clear();
    result
}

// ============================================================================
// Internal helpers
// ============================================================================

fn download_with_progress(url: &str, dest: &Path, pb: &indicatif::ProgressBar) -> Result<Fetched> {
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => bail!("GET {} returned HTTP {}", url, code),
        Err(e) => bail!("GET {} failed: {}", url, e),
    };

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        upgrade_to_bytes(pb, len);
    }

    let mut file = std::fs::File::create(dest)
        .with_context(|| format!("cannot create file {}", dest.display()))?;

    let mut reader = response.into_reader();
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("read error while downloading {}", url))?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .with_context(|| format!("write error on {}", dest.display()))?;
        hasher.update(&buffer[..bytes_read]);

        total_bytes += bytes_read as u64;
        pb.set_position(total_bytes);
    }

    file.flush()
        .with_context(|| format!("write error on {}", dest.display()))?;

    Ok(Fetched {
        bytes: total_bytes,
        sha256: hex::encode(hasher.finalize()),
    })
}
