//! Conan recipe writer
//!
//! Renders the `conanfile.py` used to build QArchive through Conan. Four
//! values are configurable through the environment:
//!
//! | variable           | default  | effect                                  |
//! |--------------------|----------|-----------------------------------------|
//! | `BUILD_TYPE`       | Release  | recorded in the file header             |
//! | `STATIC_BUILD`     | unset    | when set (to anything), Qt is static    |
//! | `QARCHIVE_VERSION` | 2.2.7    | package version                         |
//! | `QT_VERSION`       | 5.15.2   | `qt/<version>` requirement              |

use anyhow::{Context, Result};
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "conanfile.py";

pub const DEFAULT_BUILD_TYPE: &str = "Release";
pub const DEFAULT_QARCHIVE_VERSION: &str = "2.2.7";
pub const DEFAULT_QT_VERSION: &str = "5.15.2";

pub const BUILD_TYPE_VAR: &str = "BUILD_TYPE";
pub const STATIC_BUILD_VAR: &str = "STATIC_BUILD";
pub const QARCHIVE_VERSION_VAR: &str = "QARCHIVE_VERSION";
pub const QT_VERSION_VAR: &str = "QT_VERSION";

const RECIPE_TEMPLATE: &str = r#"#!/usr/bin/env python3
# build_type: {build_type}
from conans import ConanFile, CMake

class Conan(ConanFile):
   name = "QArchive"
   version = "{qarchive_version}"
   settings = "os", "compiler", "build_type", "arch"
   generators = ["cmake_find_package", "cmake", "json"]

   options = {"fPIC": [True, False]}
   default_options = {"fPIC": True}

   def configure(self):
      self.requires("libarchive/3.6.2")
      self.requires("qt/{qt_version}")
      self.requires("zlib/1.2.12")
      self.requires("zstd/1.5.5")

      self.options["qt"].shared = {build_shared}
      self.options["libarchive"].with_lz4 = True
      self.options["libarchive"].with_lzo = True
      self.options["libarchive"].with_lzma = True
      self.options["libarchive"].with_zstd = True
      self.options["libarchive"].with_bzip2 = True
"#;

/// Resolved recipe configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeConfig {
    pub build_type: String,
    /// Whether Qt is linked as a shared library.
    pub shared: bool,
    pub qarchive_version: String,
    pub qt_version: String,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            build_type: DEFAULT_BUILD_TYPE.to_string(),
            shared: true,
            qarchive_version: DEFAULT_QARCHIVE_VERSION.to_string(),
            qt_version: DEFAULT_QT_VERSION.to_string(),
        }
    }
}

impl RecipeConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
        })
    }

    /// Resolve through `lookup`, which returns `Some` for every variable that is set.
    ///
    /// Values are taken verbatim, empty strings included. `STATIC_BUILD` only
    /// matters by presence.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            build_type: lookup(BUILD_TYPE_VAR).unwrap_or(defaults.build_type),
            shared: lookup(STATIC_BUILD_VAR).is_none(),
            qarchive_version: lookup(QARCHIVE_VERSION_VAR).unwrap_or(defaults.qarchive_version),
            qt_version: lookup(QT_VERSION_VAR).unwrap_or(defaults.qt_version),
        }
    }

    /// The shared flag as a Python literal.
    pub fn build_shared(&self) -> &'static str {
        if self.shared { "True" } else { "False" }
    }

    /// Summary lines printed before the file is written.
    pub fn summary(&self) -> Vec<String> {
        vec![
            format!("BUILD_TYPE: {}", self.build_type),
            format!("SHARED BUILD: {}", self.build_shared()),
            format!("QT_VERSION: {}", self.qt_version),
            format!("QARCHIVE_VERSION: {}", self.qarchive_version),
        ]
    }
}

/// Fill the recipe template.
///
/// Slots are substituted in a single pass over the template, so values are
/// inserted verbatim even when they contain `{slot}` text themselves. Braces
/// that do not name a slot (the Python dict literals) are copied as is.
pub fn render_recipe(config: &RecipeConfig) -> String {
    let mut out = String::with_capacity(RECIPE_TEMPLATE.len() + 64);
    let mut rest = RECIPE_TEMPLATE;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match slot_value(config, tail) {
            Some((value, len)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Value for the `{name}` slot at the start of `text`, with the slot's length.
fn slot_value<'a>(config: &'a RecipeConfig, text: &str) -> Option<(&'a str, usize)> {
    let end = text.find('}')?;
    let value = match &text[1..end] {
        "build_type" => config.build_type.as_str(),
        "qarchive_version" => config.qarchive_version.as_str(),
        "qt_version" => config.qt_version.as_str(),
        "build_shared" => config.build_shared(),
        _ => return None,
    };
    Some((value, end + 1))
}

/// Render and write the recipe to `path`, replacing any existing file.
pub fn write_recipe(config: &RecipeConfig, path: &Path) -> Result<()> {
    std::fs::write(path, render_recipe(config))
        .with_context(|| format!("cannot write {}", path.display()))
}
