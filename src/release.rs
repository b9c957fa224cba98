//! Release checker
//!
//! A commit whose message carries exactly one `[Release <version>]` marker
//! requests a release of `<version>` (lowercased). The request is dropped if
//! the version already appears, whitespace-trimmed, on a line of the tag list
//! (the output of `git tag`).

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const RELEASE_MARKER: &str = "[Release ";

/// What the pipeline should do with a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseCheck {
    /// Tag and publish this version.
    New(String),
    /// Not a release commit, malformed marker, or already tagged.
    Skip,
}

impl fmt::Display for ReleaseCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New(version) => f.write_str(version),
            Self::Skip => f.write_str("false"),
        }
    }
}

/// Extract the lowercased version from a `[Release <version>]` marker.
///
/// Returns `None` unless the message contains the marker exactly once and
/// the text after it contains exactly one `]`.
pub fn parse_release_version(message: &str) -> Option<String> {
    let mut parts = message.split(RELEASE_MARKER);
    let _before = parts.next()?;
    let after = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let mut pieces = after.split(']');
    let version = pieces.next()?;
    pieces.next()?;
    if pieces.next().is_some() {
        return None;
    }

    Some(version.to_lowercase())
}

/// Whether `version` is one of the tags listed in `tags`, one per line.
pub fn is_tagged<R: BufRead>(version: &str, tags: R) -> std::io::Result<bool> {
    for line in tags.lines() {
        if line?.trim() == version {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Decide whether `message` requests a release not yet in `tags_path`.
///
/// The tag file is only opened when the message carries a valid marker.
pub fn check_release(message: &str, tags_path: &Path) -> Result<ReleaseCheck> {
    let Some(version) = parse_release_version(message) else {
        return Ok(ReleaseCheck::Skip);
    };

    let file = File::open(tags_path)
        .with_context(|| format!("cannot open tag list {}", tags_path.display()))?;
    let tagged = is_tagged(&version, BufReader::new(file))
        .with_context(|| format!("cannot read tag list {}", tags_path.display()))?;

    if tagged {
        Ok(ReleaseCheck::Skip)
    } else {
        Ok(ReleaseCheck::New(version))
    }
}
