//! Path normalization utilities.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `expand_path` - `~` and `$VAR` expansion for user-supplied paths

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Expand `~` and environment variables, then normalize.
///
/// Unknown variables are left as written.
///
/// # Example
/// ```ignore
/// let rc = expand_path("~/.panviewrc");
/// let sys = expand_path("$SYSTEMDRIVE/panview/panviewrc");
/// ```
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = shellexpand::full(raw).map_or_else(
        |_| shellexpand::tilde(raw).into_owned(),
        |s| s.into_owned(),
    );
    normalize_path(Path::new(&expanded))
}
