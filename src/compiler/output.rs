//! Output path templates.

use std::path::{Path, PathBuf};

/// Placeholder replaced by the source file's base name.
pub const FILENAME_PLACEHOLDER: &str = "{filename}";

/// Template for the compiled output path, e.g. `build/{filename}.pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    template: String,
}

impl OutputSpec {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Output path for `source`: the placeholder becomes the source's file
    /// name without its extension.
    pub fn resolve(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        PathBuf::from(self.template.replace(FILENAME_PLACEHOLDER, &stem))
    }

    /// Lower-cased extension of the output, used to look up viewer hooks.
    ///
    /// `None` when the template's file name has no extension.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.template)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}
