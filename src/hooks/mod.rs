//! Viewer hooks: what happens on load, before a recompile, and after it.
//!
//! # Module Structure
//!
//! ```text
//! hooks/
//! ├── spec.rs    # HookSpec parsing (settings values)
//! ├── runner.rs  # applying a ReloadPolicy to a viewer
//! └── mod.rs     # per-extension overrides + resolution (this file)
//! ```
//!
//! Resolution never fails: a missing, empty, malformed, or misplaced hook
//! falls back to the platform default for its role.

mod runner;
mod spec;

pub use runner::{HookContext, apply};
pub use spec::{HookError, HookSpec};

use crate::config::Settings;
use crate::debug;
use crate::platform::{LaunchCommand, Platform, ReloadPolicy, default_reload, launch_command};
use runner::{hook_vars, resolve_args};

/// Variable naming the compiled output in hook commands.
pub const OUTPUT_VAR: &str = "PANVIEW_OUTPUT";

// ============================================================================
// Roles
// ============================================================================

/// The three places a hook can be plugged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookRole {
    Load,
    Reload,
    PreReload,
}

impl HookRole {
    pub const ALL: [Self; 3] = [Self::Load, Self::Reload, Self::PreReload];

    /// Settings key for this role.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Reload => "reload",
            Self::PreReload => "pre_reload",
        }
    }

    /// Alternative settings key (`<key>_file`).
    pub const fn alias(&self) -> &'static str {
        match self {
            Self::Load => "load_file",
            Self::Reload => "reload_file",
            Self::PreReload => "pre_reload_file",
        }
    }
}

// ============================================================================
// Settings entries
// ============================================================================

/// A hook entry as found in one extension table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HookEntry {
    #[default]
    Absent,
    Valid(HookSpec),
    Invalid(HookError),
}

impl HookEntry {
    fn from_value(value: Option<&toml::Value>) -> Self {
        match value.map(HookSpec::from_value) {
            None => Self::Absent,
            Some(Ok(spec)) => Self::Valid(spec),
            Some(Err(err)) => Self::Invalid(err),
        }
    }

    /// The usable spec, if any.
    pub fn spec(&self) -> Option<&HookSpec> {
        match self {
            Self::Valid(spec) => Some(spec),
            _ => None,
        }
    }
}

/// Overrides for one output extension (a `[pdf]`-style settings table).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionOverrides {
    pub load: HookEntry,
    pub reload: HookEntry,
    pub pre_reload: HookEntry,
}

impl ExtensionOverrides {
    /// Read the three role entries from a settings table.
    ///
    /// `<role>` takes precedence over its `<role>_file` alias.
    pub fn from_table(table: &toml::Table) -> Self {
        let entry = |role: HookRole| {
            HookEntry::from_value(table.get(role.key()).or_else(|| table.get(role.alias())))
        };
        Self {
            load: entry(HookRole::Load),
            reload: entry(HookRole::Reload),
            pre_reload: entry(HookRole::PreReload),
        }
    }

    pub fn get(&self, role: HookRole) -> &HookEntry {
        match role {
            HookRole::Load => &self.load,
            HookRole::Reload => &self.reload,
            HookRole::PreReload => &self.pre_reload,
        }
    }

    /// Rejected entries, for diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = (HookRole, &HookError)> {
        HookRole::ALL.into_iter().filter_map(|role| match self.get(role) {
            HookEntry::Invalid(err) => Some((role, err)),
            _ => None,
        })
    }
}

// ============================================================================
// Resolved hooks
// ============================================================================

/// How the viewer is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// The platform's default viewer.
    Platform(Platform),
    /// A user command. `$PANVIEW_*` variables are substituted and exported;
    /// the output path is appended when no argument mentions it.
    Custom(Vec<String>),
}

impl Launcher {
    /// Command line that displays `ctx.output`.
    pub fn command_for(&self, ctx: &HookContext<'_>) -> LaunchCommand {
        match self {
            Self::Platform(platform) => launch_command(*platform, ctx.output),
            Self::Custom(argv) => {
                let pattern = format!("${OUTPUT_VAR}");
                let mentions_output = argv.iter().any(|arg| arg.contains(&pattern));

                let vars = hook_vars(ctx, None);
                let mut resolved = resolve_args(argv, &vars);
                if !mentions_output {
                    resolved.push(ctx.output.display().to_string());
                }
                // argv is non-empty: HookSpec::command rejects empty commands
                LaunchCommand::from_argv(&resolved)
                    .unwrap_or_else(|| LaunchCommand::new(ctx.output))
                    .envs(vars)
            }
        }
    }
}

/// The load / reload / pre-reload behavior for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerHooks {
    pub load: Launcher,
    pub reload: ReloadPolicy,
    pub pre_reload: ReloadPolicy,
}

impl ViewerHooks {
    /// Platform defaults: default viewer, platform reload, no pre-reload.
    pub fn defaults(platform: Platform) -> Self {
        Self {
            load: Launcher::Platform(platform),
            reload: default_reload(platform),
            pre_reload: ReloadPolicy::Nothing,
        }
    }

    /// Resolve hooks for an output extension.
    ///
    /// `new_viewer` replaces the reload roles: every change kills the viewer
    /// and launches a new one.
    pub fn resolve(
        settings: &Settings,
        extension: Option<&str>,
        platform: Platform,
        new_viewer: bool,
    ) -> Self {
        let mut hooks = Self::defaults(platform);

        if let Some(overrides) = extension.and_then(|ext| settings.extension(ext)) {
            for (role, err) in overrides.errors() {
                debug!("config"; "ignoring {} hook: {}", role.key(), err);
            }
            if let Some(load) = overrides.load.spec().and_then(|s| launcher_from(s, platform)) {
                hooks.load = load;
            }
            if let Some(reload) = overrides.reload.spec() {
                hooks.reload = policy_from(reload, default_reload(platform));
            }
            if let Some(pre_reload) = overrides.pre_reload.spec() {
                hooks.pre_reload = policy_from(pre_reload, ReloadPolicy::Nothing);
            }
        }

        if new_viewer {
            hooks.reload = ReloadPolicy::Relaunch;
            hooks.pre_reload = ReloadPolicy::Kill;
        }

        hooks
    }
}

/// Map a spec to a launcher. Only commands make sense for loading.
fn launcher_from(spec: &HookSpec, platform: Platform) -> Option<Launcher> {
    match spec {
        HookSpec::Default => Some(Launcher::Platform(platform)),
        HookSpec::Command(argv) => Some(Launcher::Custom(argv.clone())),
        other => {
            let err = HookError::NotForRole {
                spec: other.to_string(),
                role: HookRole::Load.key(),
            };
            debug!("config"; "ignoring load hook: {}", err);
            None
        }
    }
}

fn policy_from(spec: &HookSpec, default: ReloadPolicy) -> ReloadPolicy {
    match spec {
        HookSpec::Default => default,
        HookSpec::None => ReloadPolicy::Nothing,
        HookSpec::Signal(sig) => ReloadPolicy::Signal(*sig),
        HookSpec::Kill => ReloadPolicy::Kill,
        HookSpec::Restart => ReloadPolicy::HardRestart,
        HookSpec::Relaunch => ReloadPolicy::Relaunch,
        HookSpec::Command(argv) => ReloadPolicy::Command(argv.clone()),
    }
}

#[cfg(test)]
mod tests;
