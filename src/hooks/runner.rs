//! Hook execution.
//!
//! Applying a policy is best-effort: failures are logged and the session
//! goes on. The only blocking step is a hard restart's grace period.

use super::OUTPUT_VAR;
use crate::platform::{DEATH_DELAY, ReloadPolicy};
use crate::viewer::{ProcessHost, ViewerProcess};
use crate::{debug, log};
use std::path::Path;

/// Paths a hook command may refer to.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub source: &'a Path,
    pub output: &'a Path,
}

// ============================================================================
// Environment Variables
// ============================================================================

/// Build `$PANVIEW_*` variables for a hook command.
pub fn hook_vars(ctx: &HookContext<'_>, pid: Option<u32>) -> Vec<(String, String)> {
    let mut vars = vec![
        (OUTPUT_VAR.to_string(), ctx.output.display().to_string()),
        ("PANVIEW_SOURCE".to_string(), ctx.source.display().to_string()),
    ];
    if let Some(pid) = pid {
        vars.push(("PANVIEW_PID".to_string(), pid.to_string()));
    }
    vars
}

/// Replace occurrences of `$PANVIEW_XXX` in command arguments.
pub fn resolve_args(args: &[String], vars: &[(String, String)]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                let pattern = format!("${}", key);
                result = result.replace(&pattern, value);
            }
            result
        })
        .collect()
}

// ============================================================================
// Policy Execution
// ============================================================================

/// Apply `policy` to the running viewer.
///
/// `Relaunch` and `HardRestart` replace `viewer` with the new process.
pub fn apply<H: ProcessHost>(
    policy: &ReloadPolicy,
    host: &H,
    viewer: &mut H::Process,
    ctx: &HookContext<'_>,
) {
    match policy {
        ReloadPolicy::Nothing => {}
        ReloadPolicy::Signal(signal) => {
            if let Err(e) = viewer.signal(*signal) {
                log!("viewer"; "reload failed: {:#}", e);
            }
        }
        ReloadPolicy::HardRestart => hard_restart(host, viewer),
        ReloadPolicy::Kill => {
            if let Err(e) = viewer.kill() {
                log!("viewer"; "kill failed: {:#}", e);
            }
        }
        ReloadPolicy::Relaunch => relaunch(host, viewer),
        ReloadPolicy::Command(argv) => {
            let vars = hook_vars(ctx, viewer.id());
            let resolved = resolve_args(argv, &vars);
            debug!("hook"; "running `{}`", resolved.join(" "));
            if let Err(e) = host.run(&resolved, &vars) {
                log!("hook"; "failed: {:#}", e);
            }
        }
    }
}

/// Terminate, give the viewer [`DEATH_DELAY`] to exit, kill it if it is
/// still alive, then relaunch with the original command line.
pub fn hard_restart<H: ProcessHost>(host: &H, viewer: &mut H::Process) {
    if let Err(e) = viewer.terminate() {
        debug!("viewer"; "terminate failed: {:#}", e);
    }

    let exited = viewer.wait_timeout(DEATH_DELAY).unwrap_or_else(|e| {
        debug!("viewer"; "wait failed: {:#}", e);
        false
    });
    if !exited && let Err(e) = viewer.kill() {
        debug!("viewer"; "kill failed: {:#}", e);
    }

    relaunch(host, viewer);
}

fn relaunch<H: ProcessHost>(host: &H, viewer: &mut H::Process) {
    match host.spawn(viewer.command()) {
        Ok(fresh) => *viewer = fresh,
        Err(e) => log!("viewer"; "relaunch failed: {:#}", e),
    }
}
