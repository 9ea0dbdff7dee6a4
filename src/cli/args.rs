//! Command-line interface definitions.

use crate::config::ArgsSection;
use crate::core::RunMode;
use clap::{ArgGroup, ColorChoice, Parser};
use std::path::PathBuf;

/// Compile a document and keep its viewer up to date
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
#[command(group(ArgGroup::new("mode").args(["compile", "preview", "continuous"])))]
pub struct Cli {
    /// Source document
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub filename: PathBuf,

    /// Output path template; `{filename}` is the source name without extension
    #[arg(short, long, value_name = "TEMPLATE", value_hint = clap::ValueHint::FilePath)]
    pub output: String,

    /// Compile only (default)
    #[arg(short = 'p')]
    pub compile: bool,

    /// Compile and open the output
    #[arg(long = "pv")]
    pub preview: bool,

    /// Compile, open, and reload the viewer whenever the source changes
    #[arg(long = "pvc")]
    pub continuous: bool,

    /// Change to the source's directory first
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub cd: Option<bool>,

    /// Stay in the current directory
    #[arg(long = "no-cd", conflicts_with = "cd")]
    pub no_cd: bool,

    /// Compile even if the output is newer than the source
    #[arg(short = 'g', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub force: Option<bool>,

    /// Skip the compile when the output is up to date
    #[arg(long = "no-force", conflicts_with = "force")]
    pub no_force: bool,

    /// Kill the viewer and open a new one on every change
    #[arg(long = "new-viewer", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub new_viewer: Option<bool>,

    /// Reload the running viewer on change
    #[arg(long = "no-new-viewer", conflicts_with = "new_viewer")]
    pub no_new_viewer: bool,

    /// Compiler program (default: pandoc)
    #[arg(long, value_name = "PROGRAM", value_hint = clap::ValueHint::CommandName)]
    pub compiler: Option<String>,

    /// Read settings from this file only
    #[arg(long, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub rc: Option<String>,

    /// Ignore all settings files
    #[arg(long, conflicts_with = "rc")]
    pub norc: bool,

    /// Enable verbose output for debugging
    #[arg(long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Arguments passed to the compiler as they are
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMPILER_ARGS")]
    pub compiler_args: Vec<String>,
}

/// Options after merging the command line with `[args]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub force: bool,
    pub new_viewer: bool,
    pub compiler: String,
}

/// `--x[=bool]` / `--no-x` pair to a tri-state.
const fn tri_state(on: Option<bool>, off: bool) -> Option<bool> {
    if off { Some(false) } else { on }
}

impl Cli {
    pub const fn mode(&self) -> RunMode {
        if self.continuous {
            RunMode::Continuous
        } else if self.preview {
            RunMode::Preview
        } else {
            RunMode::Compile
        }
    }

    pub const fn cd(&self) -> bool {
        matches!(tri_state(self.cd, self.no_cd), Some(true))
    }

    /// Explicit flags win over `[args]`, which wins over built-in defaults.
    pub fn session_options(&self, args: &ArgsSection) -> SessionOptions {
        let compiler = self
            .compiler
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| args.compiler().to_string());

        SessionOptions {
            force: tri_state(self.force, self.no_force)
                .or(args.force)
                .unwrap_or(false),
            new_viewer: tri_state(self.new_viewer, self.no_new_viewer)
                .or(args.new_viewer)
                .unwrap_or(false),
            compiler,
        }
    }
}
