//! Settings file locations.

use crate::platform::Platform;
use crate::utils::path::expand_path;
use std::path::PathBuf;

/// Settings file name in the user's home directory.
pub const RC_NAME: &str = ".panviewrc";

/// Shared directories searched on Unix-like systems, lowest priority first.
const SHARED_DIRS: &[&str] = &[
    "/opt/local/share/panview",
    "/usr/local/share/panview",
    "/usr/local/lib/panview",
];

/// Default settings sources for a platform, lowest priority first.
///
/// Later files overwrite earlier ones key by key, so the user's own file
/// comes last.
///
/// ```text
/// windows:  %SYSTEMDRIVE%\panview\panviewrc   ~/.panviewrc
/// others:   /opt/local/share/panview/.panviewrc
///           /usr/local/share/panview/.panviewrc
///           /usr/local/lib/panview/.panviewrc
///           ~/.panviewrc
/// ```
pub fn default_search_paths(platform: Platform) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    match platform {
        Platform::Windows => {
            if let Ok(drive) = std::env::var("SYSTEMDRIVE") {
                paths.push(PathBuf::from(format!("{drive}\\")).join("panview").join("panviewrc"));
            }
        }
        _ => {
            paths.extend(SHARED_DIRS.iter().map(|dir| PathBuf::from(dir).join(RC_NAME)));
        }
    }

    paths.push(expand_path(&format!("~/{RC_NAME}")));
    paths
}
