//! Viewer reload policies and the default policy per platform.

use super::Platform;
use std::fmt;
use std::time::Duration;

/// Seconds to wait between terminating a viewer and killing it.
pub const DEATH_DELAY: Duration = Duration::from_secs(5);

/// Signal sent to a running viewer.
///
/// Numeric values are never hard-coded here: they come from the target
/// platform's definitions when the signal is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerSignal {
    /// SIGINFO (information request). macOS and the BSDs only.
    Info,
    /// SIGHUP.
    Hangup,
    /// SIGUSR1.
    User1,
    /// SIGUSR2.
    User2,
    /// SIGTERM.
    Terminate,
    /// A raw signal number from the settings file.
    Number(i32),
}

impl ViewerSignal {
    /// Parse `HUP`, `SIGHUP`, `hup` or a number.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return (n > 0).then_some(Self::Number(n));
        }
        let upper = s.to_ascii_uppercase();
        let name = upper.strip_prefix("SIG").unwrap_or(&upper);
        match name {
            "INFO" => Some(Self::Info),
            "HUP" => Some(Self::Hangup),
            "USR1" => Some(Self::User1),
            "USR2" => Some(Self::User2),
            "TERM" => Some(Self::Terminate),
            _ => None,
        }
    }

    /// Resolve to the platform signal, if this platform has one.
    #[cfg(unix)]
    pub fn to_nix(self) -> Option<nix::sys::signal::Signal> {
        use nix::sys::signal::Signal;
        match self {
            #[cfg(any(
                target_os = "macos",
                target_os = "ios",
                target_os = "freebsd",
                target_os = "dragonfly",
                target_os = "openbsd",
                target_os = "netbsd"
            ))]
            Self::Info => Some(Signal::SIGINFO),
            #[cfg(not(any(
                target_os = "macos",
                target_os = "ios",
                target_os = "freebsd",
                target_os = "dragonfly",
                target_os = "openbsd",
                target_os = "netbsd"
            )))]
            Self::Info => None,
            Self::Hangup => Some(Signal::SIGHUP),
            Self::User1 => Some(Signal::SIGUSR1),
            Self::User2 => Some(Signal::SIGUSR2),
            Self::Terminate => Some(Signal::SIGTERM),
            Self::Number(n) => Signal::try_from(n).ok(),
        }
    }
}

impl fmt::Display for ViewerSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("SIGINFO"),
            Self::Hangup => f.write_str("SIGHUP"),
            Self::User1 => f.write_str("SIGUSR1"),
            Self::User2 => f.write_str("SIGUSR2"),
            Self::Terminate => f.write_str("SIGTERM"),
            Self::Number(n) => write!(f, "signal {n}"),
        }
    }
}

/// What to do with the running viewer around a recompile.
///
/// Used for both the reload role (after recompiling) and the pre-reload
/// role (before recompiling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Leave the viewer alone (viewers that watch the file themselves).
    Nothing,
    /// Send a signal to the live viewer without restarting it.
    Signal(ViewerSignal),
    /// Terminate, wait up to [`DEATH_DELAY`], kill, relaunch.
    HardRestart,
    /// Kill the viewer (e.g. to release a file lock before recompiling).
    Kill,
    /// Launch a fresh viewer with the original command line.
    Relaunch,
    /// Run an external command (argv, `$PANVIEW_*` variables substituted).
    Command(Vec<String>),
}

impl fmt::Display for ReloadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => f.write_str("nothing"),
            Self::Signal(sig) => write!(f, "send {sig}"),
            Self::HardRestart => f.write_str("restart"),
            Self::Kill => f.write_str("kill"),
            Self::Relaunch => f.write_str("relaunch"),
            Self::Command(argv) => write!(f, "run `{}`", argv.join(" ")),
        }
    }
}

/// Default reload policy for a platform.
pub fn default_reload(platform: Platform) -> ReloadPolicy {
    match platform {
        // in-place reload is not reliable on Windows viewers
        Platform::Windows => ReloadPolicy::HardRestart,
        Platform::Mac | Platform::Bsd => ReloadPolicy::Signal(ViewerSignal::Info),
        Platform::Unix | Platform::Cygwin => ReloadPolicy::Signal(ViewerSignal::Hangup),
    }
}
