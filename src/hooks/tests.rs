use std::path::Path;

use super::*;
use super::runner::{hard_restart, hook_vars, resolve_args};
use crate::platform::ViewerSignal;
use crate::viewer::{ProcessHost, ViewerProcess};
use crate::viewer::mock::{Event, Journal, MockHost};

const ALL_PLATFORMS: [Platform; 5] = [
    Platform::Windows,
    Platform::Cygwin,
    Platform::Mac,
    Platform::Bsd,
    Platform::Unix,
];

fn settings(src: &str) -> Settings {
    Settings::from_table(toml::from_str(src).unwrap())
}

fn ctx() -> HookContext<'static> {
    HookContext {
        source: Path::new("notes.md"),
        output: Path::new("notes.pdf"),
    }
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_no_table_means_platform_defaults() {
    let settings = settings("[html]\nreload = 'none'");
    for platform in ALL_PLATFORMS {
        let hooks = ViewerHooks::resolve(&settings, Some("pdf"), platform, false);
        assert_eq!(hooks, ViewerHooks::defaults(platform));
    }
}

#[test]
fn test_no_extension_skips_lookup() {
    let settings = settings("[pdf]\nreload = 'none'");
    let hooks = ViewerHooks::resolve(&settings, None, Platform::Mac, false);
    assert_eq!(hooks, ViewerHooks::defaults(Platform::Mac));
}

#[test]
fn test_invalid_values_fall_back_to_defaults() {
    let settings = settings(
        r#"
[pdf]
load = "__import__('os').system('rm -rf /')"
reload = "signal:NOPE"
pre_reload = 7
"#,
    );
    for platform in ALL_PLATFORMS {
        let hooks = ViewerHooks::resolve(&settings, Some("pdf"), platform, false);
        assert_eq!(hooks, ViewerHooks::defaults(platform));
    }
}

#[test]
fn test_custom_hooks_replace_defaults() {
    let settings = settings(
        r#"
[pdf]
load = ["xpdf", "-remote", "panview"]
reload = "command:xpdf -remote panview -reload"
pre_reload = "kill"
"#,
    );
    let hooks = ViewerHooks::resolve(&settings, Some("pdf"), Platform::Unix, false);
    assert_eq!(
        hooks.load,
        Launcher::Custom(vec!["xpdf".into(), "-remote".into(), "panview".into()])
    );
    assert_eq!(
        hooks.reload,
        ReloadPolicy::Command(vec![
            "xpdf".into(),
            "-remote".into(),
            "panview".into(),
            "-reload".into()
        ])
    );
    assert_eq!(hooks.pre_reload, ReloadPolicy::Kill);
}

#[test]
fn test_default_spec_per_role() {
    let settings = settings("[pdf]\nload = 'default'\nreload = 'default'\npre_reload = 'default'");
    let hooks = ViewerHooks::resolve(&settings, Some("PDF"), Platform::Windows, false);
    assert_eq!(hooks, ViewerHooks::defaults(Platform::Windows));
}

#[test]
fn test_load_rejects_non_commands() {
    let settings = settings("[pdf]\nload = 'kill'\nreload = 'signal:USR1'");
    let hooks = ViewerHooks::resolve(&settings, Some("pdf"), Platform::Mac, false);
    assert_eq!(hooks.load, Launcher::Platform(Platform::Mac));
    assert_eq!(hooks.reload, ReloadPolicy::Signal(ViewerSignal::User1));
}

#[test]
fn test_new_viewer_overrides_reload_roles() {
    let settings = settings("[pdf]\nload = ['zathura']\nreload = 'signal:HUP'\npre_reload = 'none'");
    let hooks = ViewerHooks::resolve(&settings, Some("pdf"), Platform::Unix, true);
    assert_eq!(hooks.load, Launcher::Custom(vec!["zathura".into()]));
    assert_eq!(hooks.reload, ReloadPolicy::Relaunch);
    assert_eq!(hooks.pre_reload, ReloadPolicy::Kill);

    let plain = ViewerHooks::resolve(&Settings::default(), None, Platform::Mac, true);
    assert_eq!(plain.reload, ReloadPolicy::Relaunch);
    assert_eq!(plain.pre_reload, ReloadPolicy::Kill);
}

// ============================================================================
// Launcher
// ============================================================================

#[test]
fn test_custom_launcher_appends_output() {
    let launcher = Launcher::Custom(vec!["zathura".into(), "--fork".into()]);
    let cmd = launcher.command_for(&ctx());
    assert_eq!(cmd.to_string(), "zathura --fork notes.pdf");
}

#[test]
fn test_custom_launcher_substitutes_output() {
    let launcher = Launcher::Custom(vec![
        "gv".into(),
        "--watch=$PANVIEW_OUTPUT".into(),
    ]);
    let cmd = launcher.command_for(&ctx());
    assert_eq!(cmd.to_string(), "gv --watch=notes.pdf");
}

#[test]
fn test_custom_launcher_sees_source() {
    let launcher = Launcher::Custom(vec![
        "viewer".into(),
        "--title=$PANVIEW_SOURCE".into(),
    ]);
    let cmd = launcher.command_for(&ctx());
    assert_eq!(cmd.to_string(), "viewer --title=notes.md notes.pdf");
    assert!(cmd.envs.contains(&("PANVIEW_SOURCE".to_string(), "notes.md".to_string())));
    assert!(cmd.envs.contains(&("PANVIEW_OUTPUT".to_string(), "notes.pdf".to_string())));
}

#[test]
fn test_platform_launcher() {
    let html = HookContext {
        source: Path::new("a.md"),
        output: Path::new("a.html"),
    };
    let cmd = Launcher::Platform(Platform::Mac).command_for(&html);
    assert_eq!(cmd.to_string(), "open a.html");
}

// ============================================================================
// Runner
// ============================================================================

#[test]
fn test_resolve_args() {
    let vars = hook_vars(&ctx(), Some(42));
    let args = vec![
        "--file=$PANVIEW_OUTPUT".to_string(),
        "$PANVIEW_PID".to_string(),
        "$PANVIEW_SOURCE".to_string(),
        "$HOME".to_string(),
    ];
    assert_eq!(
        resolve_args(&args, &vars),
        vec!["--file=notes.pdf", "42", "notes.md", "$HOME"]
    );
}

#[test]
fn test_hook_vars_without_pid() {
    let vars = hook_vars(&ctx(), None);
    assert!(vars.iter().all(|(k, _)| k != "PANVIEW_PID"));
    assert_eq!(vars.len(), 2);
}

#[test]
fn test_hard_restart_relaunches_same_command() {
    let journal = Journal::default();
    let host = MockHost::new(journal.clone());
    let launch = Launcher::Platform(Platform::Windows).command_for(&ctx());
    let mut viewer = host.spawn(&launch).unwrap();
    let first_pid = viewer.pid;

    apply(&ReloadPolicy::HardRestart, &host, &mut viewer, &ctx());

    assert_ne!(viewer.pid, first_pid);
    assert_eq!(viewer.command(), &launch);
    assert_eq!(
        journal.events(),
        vec![
            Event::Launch(launch.to_string()),
            Event::Terminate,
            Event::Launch(launch.to_string()),
        ]
    );
}

#[test]
fn test_hard_restart_escalates_to_kill() {
    let journal = Journal::default();
    let host = MockHost::new(journal.clone()).stubborn();
    let launch = LaunchCommand::new("viewer").arg("out.pdf");
    let mut viewer = host.spawn(&launch).unwrap();

    hard_restart(&host, &mut viewer);

    assert_eq!(
        journal.events(),
        vec![
            Event::Launch("viewer out.pdf".into()),
            Event::Terminate,
            Event::Kill,
            Event::Launch("viewer out.pdf".into()),
        ]
    );
    assert_eq!(viewer.command(), &launch);
}

#[test]
fn test_failed_relaunch_keeps_old_handle() {
    let journal = Journal::default();
    let good = MockHost::new(journal.clone());
    let mut viewer = good.spawn(&LaunchCommand::new("viewer")).unwrap();
    let pid = viewer.pid;

    let broken = MockHost::new(journal.clone()).broken();
    apply(&ReloadPolicy::Relaunch, &broken, &mut viewer, &ctx());
    assert_eq!(viewer.pid, pid);
}

#[test]
fn test_apply_signal_and_command() {
    let journal = Journal::default();
    let host = MockHost::new(journal.clone());
    let mut viewer = host.spawn(&LaunchCommand::new("viewer")).unwrap();

    apply(
        &ReloadPolicy::Signal(ViewerSignal::Info),
        &host,
        &mut viewer,
        &ctx(),
    );
    apply(
        &ReloadPolicy::Command(vec!["reload-it".into(), "$PANVIEW_OUTPUT".into()]),
        &host,
        &mut viewer,
        &ctx(),
    );
    apply(&ReloadPolicy::Nothing, &host, &mut viewer, &ctx());

    assert_eq!(
        journal.events()[1..],
        [
            Event::Signal(ViewerSignal::Info),
            Event::Run(vec!["reload-it".into(), "notes.pdf".into()]),
        ]
    );
}
