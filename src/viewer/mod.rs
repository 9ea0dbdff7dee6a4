//! The viewer process and the host that launches it.
//!
//! Everything the supervisor does to the outside world besides compiling
//! goes through [`ProcessHost`], so the watch loop can run against a
//! recording host in tests.

#[cfg(test)]
pub mod mock;
mod process;

pub use process::SystemHost;

use crate::platform::{LaunchCommand, ViewerSignal};
use anyhow::Result;
use std::time::Duration;

/// Handle to one launched viewer.
pub trait ViewerProcess {
    /// Command line the viewer was launched with.
    fn command(&self) -> &LaunchCommand;

    /// OS process id, if still known.
    fn id(&self) -> Option<u32>;

    /// Send a signal without restarting the viewer.
    fn signal(&mut self, signal: ViewerSignal) -> Result<()>;

    /// Ask the viewer to exit.
    fn terminate(&mut self) -> Result<()>;

    /// Force the viewer to exit.
    fn kill(&mut self) -> Result<()>;

    /// Wait up to `timeout` for exit. Returns `true` if the viewer is gone.
    fn wait_timeout(&mut self, timeout: Duration) -> Result<bool>;
}

/// Launches viewers and runs hook commands.
pub trait ProcessHost {
    type Process: ViewerProcess;

    /// Start a viewer. Does not wait for it.
    fn spawn(&self, command: &LaunchCommand) -> Result<Self::Process>;

    /// Run a hook command to completion.
    fn run(&self, argv: &[String], envs: &[(String, String)]) -> Result<()>;
}
