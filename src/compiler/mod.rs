//! Document compilation.
//!
//! The compiler itself is an external program; this module only knows how
//! to name its output and how to call it. Compilation never fails the
//! session: a failed run is reported and the output path is still known.

mod output;
mod pandoc;

pub use output::OutputSpec;
pub use pandoc::Pandoc;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Result of one compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    /// Resolved output path, whether or not the compile succeeded.
    pub output: PathBuf,
    /// Failure message, `None` on success.
    pub error: Option<String>,
}

impl CompileReport {
    pub fn ok(output: PathBuf) -> Self {
        Self {
            output,
            error: None,
        }
    }

    pub fn failed(output: PathBuf, error: impl Into<String>) -> Self {
        Self {
            output,
            error: Some(error.into()),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Something that turns a source file into an output file.
pub trait DocumentCompiler {
    /// Output path `source` compiles to.
    fn output_for(&self, source: &Path) -> PathBuf;

    /// Compile `source`. Diagnostics are reported by the implementation.
    fn compile(&self, source: &Path) -> CompileReport;
}

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check if `output` exists and is at least as new as `source`.
///
/// Returns `false` if either file is missing or times can't be compared,
/// so an unknown state always recompiles.
pub fn is_up_to_date(source: &Path, output: &Path) -> bool {
    let (Some(source_time), Some(output_time)) = (get_mtime(source), get_mtime(output)) else {
        return false;
    };
    output_time >= source_time
}
