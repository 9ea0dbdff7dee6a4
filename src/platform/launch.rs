//! Default viewer launch commands.

use super::Platform;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;

/// A program and its arguments, as used to launch (and relaunch) a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
    /// Exported to the viewer; not part of the displayed command line.
    pub envs: Vec<(String, String)>,
}

impl LaunchCommand {
    pub fn new<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Create from a command array (e.g., `["open", "out.pdf"]`).
    ///
    /// Returns `None` for an empty slice.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Option<Self> {
        let (program, rest) = argv.split_first()?;
        Some(Self {
            program: program.as_ref().into(),
            args: rest.iter().map(|s| s.as_ref().into()).collect(),
            envs: Vec::new(),
        })
    }

    pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn envs(mut self, vars: Vec<(String, String)>) -> Self {
        self.envs = vars;
        self
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Command that opens `path` in the platform's default viewer.
pub fn launch_command(platform: Platform, path: &Path) -> LaunchCommand {
    match platform {
        // `start` is a cmd builtin; the empty string is the window title
        Platform::Windows => LaunchCommand::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("")
            .arg(path),
        Platform::Cygwin => LaunchCommand::new("cmd").arg("/c").arg("start").arg(path),
        Platform::Mac => LaunchCommand::new("open").arg(path),
        Platform::Bsd | Platform::Unix => LaunchCommand::new("xdg-open").arg(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_command_per_platform() {
        let path = Path::new("out.pdf");

        let mac = launch_command(Platform::Mac, path);
        assert_eq!(mac.to_string(), "open out.pdf");

        let unix = launch_command(Platform::Unix, path);
        assert_eq!(unix.to_string(), "xdg-open out.pdf");
        assert_eq!(launch_command(Platform::Bsd, path), unix);

        let cygwin = launch_command(Platform::Cygwin, path);
        assert_eq!(cygwin.to_string(), "cmd /c start out.pdf");

        let windows = launch_command(Platform::Windows, path);
        assert_eq!(windows.program, OsString::from("cmd"));
        assert_eq!(windows.args.last(), Some(&OsString::from("out.pdf")));
        assert!(windows.args.contains(&OsString::from("start")));
    }

    #[test]
    fn test_launch_command_is_deterministic() {
        let path = Path::new("/tmp/report.html");
        for platform in [
            Platform::Windows,
            Platform::Cygwin,
            Platform::Mac,
            Platform::Bsd,
            Platform::Unix,
        ] {
            assert_eq!(
                launch_command(platform, path),
                launch_command(platform, path)
            );
        }
    }

    #[test]
    fn test_from_argv() {
        let cmd = LaunchCommand::from_argv(&["zathura", "--fork", "a.pdf"]).unwrap();
        assert_eq!(cmd.program, OsString::from("zathura"));
        assert_eq!(cmd.args.len(), 2);

        let empty: [&str; 0] = [];
        assert!(LaunchCommand::from_argv(&empty).is_none());
    }
}
