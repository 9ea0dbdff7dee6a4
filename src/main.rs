//! panview - compile a document and keep its viewer up to date.

mod cli;
mod compiler;
mod config;
mod core;
mod hooks;
mod logger;
mod platform;
mod utils;
mod viewer;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use compiler::{OutputSpec, Pandoc};
use config::{Settings, SettingsSource};
use hooks::ViewerHooks;
use platform::Platform;
use viewer::SystemHost;
use watch::{FsProbe, PollPacer, Supervisor};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let platform = Platform::detect();
    debug!("cli"; "platform: {}", platform);

    let source = if cli.cd() {
        cli::enter_source_dir(&cli.filename)?
    } else {
        cli.filename.clone()
    };

    let settings_source = match (&cli.rc, cli.norc) {
        (_, true) => SettingsSource::None,
        (Some(rc), false) => SettingsSource::Explicit(rc.clone()),
        (None, false) => SettingsSource::Defaults(platform),
    };
    let settings = Settings::resolve(&settings_source);
    let options = cli.session_options(&settings.args);

    let output = OutputSpec::new(cli.output.as_str());
    let hooks = ViewerHooks::resolve(
        &settings,
        output.extension().as_deref(),
        platform,
        options.new_viewer,
    );
    debug!("viewer"; "load: {:?}, reload: {}, pre_reload: {}", hooks.load, hooks.reload, hooks.pre_reload);

    let compiler = Pandoc::new(options.compiler, output, cli.compiler_args.clone());
    let host = SystemHost;

    let supervisor = Supervisor {
        source: &source,
        compiler: &compiler,
        host: &host,
        hooks: &hooks,
        force: options.force,
    };
    supervisor.run(cli.mode(), &mut FsProbe, &mut PollPacer::default())
}
