//! Host platform detection and the per-platform viewer strategies.
//!
//! ```text
//! platform/
//! ├── mod.rs     # Platform tag + classifier (this file)
//! ├── launch.rs  # how a file is opened in the default viewer
//! └── reload.rs  # how a running viewer is told to reload
//! ```

mod launch;
mod reload;

pub use launch::{LaunchCommand, launch_command};
pub use reload::{DEATH_DELAY, ReloadPolicy, ViewerSignal, default_reload};

use std::fmt;

/// Host platform, as far as viewer handling is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    /// Unix-like userland on Windows: reloads like `Unix`, launches through `cmd`.
    Cygwin,
    /// macOS / Darwin.
    Mac,
    Bsd,
    /// Linux and every other Unix-like system.
    Unix,
}

/// Ordered needles for [`Platform::classify`]. First match wins.
const NEEDLES: &[(&str, Platform)] = &[
    ("windows", Platform::Windows),
    ("cygwin", Platform::Cygwin),
    ("darwin", Platform::Mac),
    ("macos", Platform::Mac),
    ("bsd", Platform::Bsd),
    ("dragonfly", Platform::Bsd),
];

impl Platform {
    /// Classify an operating system name.
    ///
    /// Case-insensitive substring match against [`NEEDLES`]; anything
    /// unrecognized is assumed to be Unix-like enough.
    pub fn classify(os_name: &str) -> Self {
        let name = os_name.to_ascii_lowercase();
        NEEDLES
            .iter()
            .find(|(needle, _)| name.contains(needle))
            .map(|(_, platform)| *platform)
            .unwrap_or(Self::Unix)
    }

    /// Classify the platform this binary runs on.
    pub fn detect() -> Self {
        Self::classify(std::env::consts::OS)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Cygwin => "cygwin",
            Self::Mac => "mac",
            Self::Bsd => "bsd",
            Self::Unix => "unix",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
