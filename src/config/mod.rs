//! Session settings from `.panviewrc` files.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── args.rs    # [args] section
//! ├── error.rs   # ConfigError
//! ├── util.rs    # default search paths
//! └── mod.rs     # Settings (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[args]`       | defaults for command-line options                |
//! | `[<ext>]`      | viewer hooks for outputs with that extension     |
//!
//! Settings are built once per session and passed by reference. Sources
//! are merged shallowly: a later file replaces whole top-level tables of
//! earlier ones. Nothing here aborts a session; bad sources are skipped.

mod args;
mod error;
mod util;

pub use args::ArgsSection;
pub use error::ConfigError;
use util::default_search_paths;

use crate::debug;
use crate::hooks::ExtensionOverrides;
use crate::platform::Platform;
use crate::utils::path::expand_path;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the option-defaults table.
const ARGS_KEY: &str = "args";

/// Where settings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    /// `--norc`: built-in defaults only.
    None,
    /// `--rc <path>`: exactly this file.
    Explicit(String),
    /// The platform's default search list.
    Defaults(Platform),
}

impl SettingsSource {
    /// Files to read, lowest priority first.
    pub fn paths(&self) -> Vec<PathBuf> {
        match self {
            Self::None => Vec::new(),
            Self::Explicit(raw) => vec![expand_path(raw)],
            Self::Defaults(platform) => default_search_paths(*platform),
        }
    }
}

/// Resolved, immutable session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub args: ArgsSection,
    /// Keyed by lower-cased extension, without the dot.
    extensions: BTreeMap<String, ExtensionOverrides>,
}

impl Settings {
    /// Load and merge every file of `source`.
    pub fn resolve(source: &SettingsSource) -> Self {
        let mut merged = toml::Table::new();
        for path in source.paths() {
            match read_table(&path) {
                Ok(Some(table)) => {
                    debug!("config"; "loaded {}", path.display());
                    merge_shallow(&mut merged, table);
                }
                Ok(None) => {}
                Err(e) => debug!("config"; "skipping: {:#}", anyhow::Error::from(e)),
            }
        }
        Self::from_table(merged)
    }

    /// Build settings from an already merged table.
    pub fn from_table(table: toml::Table) -> Self {
        let mut settings = Self::default();

        for (key, value) in table {
            if key == ARGS_KEY {
                let args = ArgsSection::from_value(value, |field| {
                    debug!("config"; "unknown key `args.{}`", field);
                });
                match args {
                    Ok(args) => settings.args = args,
                    Err(e) => debug!("config"; "{}", e),
                }
                continue;
            }

            match value {
                toml::Value::Table(ext_table) => {
                    let ext = key.trim_start_matches('.').to_ascii_lowercase();
                    settings
                        .extensions
                        .insert(ext, ExtensionOverrides::from_table(&ext_table));
                }
                other => {
                    debug!("config"; "ignoring top-level `{}` ({})", key, other.type_str());
                }
            }
        }

        settings
    }

    /// Overrides for an output extension (case-insensitive, dot optional).
    pub fn extension(&self, ext: &str) -> Option<&ExtensionOverrides> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.extensions.get(&ext)
    }
}

/// Read one settings file. A missing file is `Ok(None)`.
fn read_table(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|err| ConfigError::Toml(path.to_path_buf(), err))
}

/// Overlay `layer` onto `base`, replacing top-level keys only.
fn merge_shallow(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        base.insert(key, value);
    }
}
