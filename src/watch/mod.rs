//! Session supervisor: one-shot compile, preview, and the continuous
//! watch/reload loop.
//!
//! # Module Structure
//!
//! ```text
//! watch/
//! ├── probe.rs   # source stamps + change detection
//! └── mod.rs     # Pacer, Supervisor (this file)
//! ```
//!
//! # Continuous mode
//!
//! ```text
//! stamp → compile → launch
//!   └─ loop: wait → stamp changed? → pre_reload → compile → reload
//! ```
//!
//! The supervisor owns the only viewer handle. Time, the file system, the
//! compiler and processes all come in through traits, so the loop itself
//! has no global state.

mod probe;

pub use probe::{FsProbe, SourceProbe, SourceStamp, WatchState};

use crate::compiler::{CompileReport, DocumentCompiler, is_up_to_date};
use crate::core::{self, RunMode};
use crate::hooks::{self, HookContext, ViewerHooks};
use crate::logger::{status_detach, status_error, status_success, status_warning};
use crate::viewer::ProcessHost;
use crate::{debug, log};
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Default delay between two polls of the source.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Granularity of shutdown checks while waiting.
const SLICE: Duration = Duration::from_millis(50);

// ============================================================================
// Pacing
// ============================================================================

/// Drives the poll loop and reports user interruption.
pub trait Pacer {
    /// Block until the next poll. `false` once the session should stop.
    fn wait(&mut self) -> bool;

    /// A pre-reload → compile → reload cycle starts.
    fn begin_cycle(&mut self);

    /// Whether the running cycle was cancelled.
    fn cycle_interrupted(&self) -> bool;

    /// The cycle is over. Returns `true` if it was cancelled.
    fn end_cycle(&mut self) -> bool;
}

/// Real-time pacer backed by the Ctrl+C state in [`crate::core`].
#[derive(Debug, Clone, Copy)]
pub struct PollPacer {
    interval: Duration,
}

impl PollPacer {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for PollPacer {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}

impl Pacer for PollPacer {
    fn wait(&mut self) -> bool {
        let deadline = Instant::now() + self.interval;
        while !core::is_shutdown() {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(SLICE.min(deadline - now));
        }
        false
    }

    fn begin_cycle(&mut self) {
        core::begin_update();
    }

    fn cycle_interrupted(&self) -> bool {
        core::is_interrupted()
    }

    fn end_cycle(&mut self) -> bool {
        core::end_update()
    }
}

// ============================================================================
// Supervisor
// ============================================================================

/// Counters for one continuous session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Detected changes.
    pub cycles: usize,
    /// Cycles whose compile failed.
    pub failures: usize,
    /// Cycles cancelled by Ctrl+C.
    pub interrupted: usize,
}

/// Everything a session needs, borrowed from `main`.
pub struct Supervisor<'a, C, H> {
    pub source: &'a Path,
    pub compiler: &'a C,
    pub host: &'a H,
    pub hooks: &'a ViewerHooks,
    /// Compile even if the output is up to date (one-shot modes only).
    pub force: bool,
}

impl<C: DocumentCompiler, H: ProcessHost> Supervisor<'_, C, H> {
    /// Run the session in `mode`.
    ///
    /// One-shot modes fail when the compile fails. Continuous mode only
    /// returns once shutdown is requested and is always `Ok`.
    pub fn run(
        &self,
        mode: RunMode,
        probe: &mut impl SourceProbe,
        pacer: &mut impl Pacer,
    ) -> Result<()> {
        match mode {
            RunMode::Compile => self.compile_once().map(|_| ()),
            RunMode::Preview => self.preview(),
            RunMode::Continuous => {
                let summary = self.watch(probe, pacer);
                debug!(
                    "watch";
                    "stopped after {} change(s), {} failed, {} interrupted",
                    summary.cycles, summary.failures, summary.interrupted
                );
                Ok(())
            }
        }
    }

    /// Compile unless the output is already newer than the source.
    pub fn compile_once(&self) -> Result<PathBuf> {
        let output = self.compiler.output_for(self.source);
        if !self.force && is_up_to_date(self.source, &output) {
            log!("pandoc"; "{} is up to date", output.display());
            return Ok(output);
        }

        let report = self.compiler.compile(self.source);
        if let Some(err) = report.error {
            bail!("{}", err);
        }
        Ok(report.output)
    }

    /// Compile once and open the output.
    ///
    /// The viewer is opened even if the compile failed, so a previous
    /// output stays visible; the failure is still returned.
    pub fn preview(&self) -> Result<()> {
        let compiled = self.compile_once();
        let output = match &compiled {
            Ok(output) => output.clone(),
            Err(_) => self.compiler.output_for(self.source),
        };
        self.launch(&output);
        compiled.map(|_| ())
    }

    /// Compile, open, then keep the viewer in sync until shutdown.
    pub fn watch(&self, probe: &mut impl SourceProbe, pacer: &mut impl Pacer) -> WatchSummary {
        let mut state = WatchState::new();
        // stamp first: the initial compile must not look like a change
        state.observe(probe.stamp(self.source));

        let report = self.compiler.compile(self.source);
        self.show_report(&report, "compiled");
        let mut viewer = self.launch(&report.output);

        log!("watch"; "watching {}, Ctrl+C to stop", self.source.display());
        status_detach();

        let mut summary = WatchSummary::default();
        while pacer.wait() {
            if !state.observe(probe.stamp(self.source)) {
                continue;
            }
            summary.cycles += 1;

            pacer.begin_cycle();
            let compiled = self.cycle(&mut viewer, &*pacer);
            if pacer.end_cycle() {
                summary.interrupted += 1;
                status_warning("reload interrupted, viewer kept");
            } else if !compiled {
                summary.failures += 1;
            }
        }

        status_detach();
        log!("watch"; "stopped");
        summary
    }

    /// One pre-reload → compile → reload cycle. `false` if the compile
    /// failed or the cycle was cut short.
    fn cycle(&self, viewer: &mut Option<H::Process>, pacer: &impl Pacer) -> bool {
        let output = self.compiler.output_for(self.source);
        let ctx = HookContext {
            source: self.source,
            output: &output,
        };

        if let Some(viewer) = viewer.as_mut() {
            hooks::apply(&self.hooks.pre_reload, self.host, viewer, &ctx);
        }
        if pacer.cycle_interrupted() {
            return false;
        }

        let report = self.compiler.compile(self.source);
        if pacer.cycle_interrupted() {
            return false;
        }

        if let Some(running) = viewer.as_mut() {
            let ctx = HookContext {
                source: self.source,
                output: &report.output,
            };
            hooks::apply(&self.hooks.reload, self.host, running, &ctx);
        } else {
            // the first launch failed: try again instead of reloading
            *viewer = self.launch(&report.output);
        }

        self.show_report(&report, "reloaded")
    }

    fn launch(&self, output: &Path) -> Option<H::Process> {
        let ctx = HookContext {
            source: self.source,
            output,
        };
        let command = self.hooks.load.command_for(&ctx);
        match self.host.spawn(&command) {
            Ok(viewer) => Some(viewer),
            Err(e) => {
                log!("viewer"; "cannot open {}: {:#}", output.display(), e);
                None
            }
        }
    }

    fn show_report(&self, report: &CompileReport, verb: &str) -> bool {
        match &report.error {
            None => {
                status_success(&format!("{verb}: {}", report.output.display()));
                true
            }
            Some(err) => {
                status_error(&format!("compile failed: {}", self.source.display()), err);
                false
            }
        }
    }
}
