//! Real viewer processes backed by `std::process::Child`.

use super::{ProcessHost, ViewerProcess};
use crate::platform::{LaunchCommand, ViewerSignal};
use crate::utils::exec::Cmd;
use anyhow::{Context, Result, bail};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Interval between `try_wait` polls while waiting for exit.
const EXIT_POLL: Duration = Duration::from_millis(50);

/// Launches real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl ProcessHost for SystemHost {
    type Process = ChildViewer;

    fn spawn(&self, command: &LaunchCommand) -> Result<ChildViewer> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null());
        // own process group: a terminal Ctrl+C must not reach the viewer
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        let child = cmd
            .spawn()
            .with_context(|| format!("Failed to launch `{command}`"))?;

        crate::debug!("viewer"; "launched `{}` (pid {})", command, child.id());
        Ok(ChildViewer {
            command: command.clone(),
            child,
            exited: false,
        })
    }

    fn run(&self, argv: &[String], envs: &[(String, String)]) -> Result<()> {
        if argv.is_empty() {
            bail!("empty hook command");
        }
        Cmd::from_slice(argv)
            .envs(envs.iter().map(|(k, v)| (k, v)))
            .run()?;
        Ok(())
    }
}

/// A viewer launched by [`SystemHost`].
#[derive(Debug)]
pub struct ChildViewer {
    command: LaunchCommand,
    child: Child,
    exited: bool,
}

impl ChildViewer {
    /// Reap the child if it has exited.
    fn poll_exit(&mut self) -> Result<bool> {
        if !self.exited {
            self.exited = self.child.try_wait()?.is_some();
        }
        Ok(self.exited)
    }
}

impl ViewerProcess for ChildViewer {
    fn command(&self) -> &LaunchCommand {
        &self.command
    }

    fn id(&self) -> Option<u32> {
        (!self.exited).then(|| self.child.id())
    }

    #[cfg(unix)]
    fn signal(&mut self, signal: ViewerSignal) -> Result<()> {
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        if self.poll_exit()? {
            bail!("viewer `{}` is no longer running", self.command);
        }
        let Some(sig) = signal.to_nix() else {
            bail!("{signal} is not available on this platform");
        };
        #[allow(clippy::cast_possible_wrap)]
        let pid = Pid::from_raw(self.child.id() as i32);
        kill(pid, sig).with_context(|| format!("Failed to send {signal} to pid {pid}"))
    }

    #[cfg(not(unix))]
    fn signal(&mut self, signal: ViewerSignal) -> Result<()> {
        bail!("cannot send {signal}: signals are not supported on this platform")
    }

    #[cfg(unix)]
    fn terminate(&mut self) -> Result<()> {
        if self.poll_exit()? {
            return Ok(());
        }
        self.signal(ViewerSignal::Terminate)
    }

    #[cfg(not(unix))]
    fn terminate(&mut self) -> Result<()> {
        // no graceful request exists; TerminateProcess is all we have
        self.kill()
    }

    fn kill(&mut self) -> Result<()> {
        if self.poll_exit()? {
            return Ok(());
        }
        self.child
            .kill()
            .with_context(|| format!("Failed to kill `{}`", self.command))?;
        // reap so no zombie is left behind
        self.child.wait()?;
        self.exited = true;
        Ok(())
    }

    fn wait_timeout(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.poll_exit()? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(EXIT_POLL);
        }
    }
}
