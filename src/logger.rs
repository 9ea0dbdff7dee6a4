//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//! - `WatchStatus` for continuous-mode status messages
//!
//! # Example
//!
//! ```ignore
//! log!("pandoc"; "compiling {}", source.display());
//! debug!("config"; "skipping {}: {}", path.display(), err);
//! status_success("reloaded: notes.md");
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::LazyLock,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Bumped by every `log` call, so the watch status knows when other
/// output landed below it.
static LOG_EPOCH: AtomicUsize = AtomicUsize::new(0);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
///
/// Error-class modules go to stderr so compiler diagnostics stay out of
/// piped stdout.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();

    if is_error_module(&module_lower) {
        let prefix = colorize_prefix(module, &module_lower, Stream::Stderr);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        stderr.flush().ok();
    } else {
        let prefix = colorize_prefix(module, &module_lower, Stream::Stdout);
        let mut stdout = stdout().lock();
        execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
        writeln!(stdout, "{prefix} {message}").ok();
        stdout.flush().ok();
    }

    LOG_EPOCH.fetch_add(1, Ordering::SeqCst);
}

#[inline]
fn is_error_module(module_lower: &str) -> bool {
    matches!(module_lower, "error" | "pandoc")
}

/// Style `text` if `stream` takes colors (honors `--color`).
fn paint(text: &str, style: Style, stream: Stream) -> String {
    text.if_supports_color(stream, |t| t.style(style)).to_string()
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str, stream: Stream) -> String {
    let style = match module_lower {
        "viewer" => Style::new().bright_blue(),
        "watch" => Style::new().bright_green(),
        "error" => Style::new().bright_red(),
        "pandoc" => Style::new().bright_magenta(),
        _ => Style::new().bright_yellow(),
    };
    paint(&format!("[{module}]"), style.bold(), stream)
}

// ============================================================================
// Watch Status (single-line status with overwrite)
// ============================================================================

/// Get current time formatted as HH:MM:SS (UTC)
fn now() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Single-line status display for continuous mode
///
/// Each message overwrites the previous one so a long preview session
/// keeps the terminal clean.
///
/// # Example
///
/// ```ignore
/// let mut status = WatchStatus::new();
/// status.success("reloaded: notes.md");
/// status.error("compile failed", "pandoc: unknown option");
/// ```
pub struct WatchStatus {
    /// Lines of previous output to clear
    last_lines: usize,
    /// `LOG_EPOCH` right after the previous block was written
    epoch: usize,
}

static WATCH_STATUS: LazyLock<Mutex<WatchStatus>> =
    LazyLock::new(|| Mutex::new(WatchStatus::new()));

impl WatchStatus {
    pub const fn new() -> Self {
        Self {
            last_lines: 0,
            epoch: 0,
        }
    }

    /// Display success message (✓ prefix, green).
    pub fn success(&mut self, message: &str) {
        self.display(paint("✓", Style::new().green(), Stream::Stdout), message);
    }

    /// Display error message (✗ prefix, red) with optional detail.
    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(paint("✗", Style::new().red(), Stream::Stdout), &message);
    }

    /// Display warning message (⚠ prefix, yellow).
    pub fn warning(&mut self, detail: &str) {
        self.display(paint("⚠", Style::new().yellow(), Stream::Stdout), detail);
    }

    fn display(&mut self, symbol: String, message: &str) {
        let mut stdout = stdout().lock();

        let lines = self.lines_to_clear();
        if lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = lines as u16;
            execute!(stdout, cursor::MoveUp(lines)).ok();
            execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        }

        let timestamp = paint(&format!("[{}]", now()), Style::new().dimmed(), Stream::Stdout);
        writeln!(stdout, "{timestamp} {symbol} {message}").ok();
        stdout.flush().ok();

        self.last_lines = message.matches('\n').count() + 1;
        self.epoch = LOG_EPOCH.load(Ordering::SeqCst);
    }

    /// Lines the next message overwrites. Zero once anything was logged
    /// after the previous block.
    fn lines_to_clear(&self) -> usize {
        if self.epoch == LOG_EPOCH.load(Ordering::SeqCst) {
            self.last_lines
        } else {
            0
        }
    }

    /// Forget the previous block so the next message does not erase
    /// lines written by other loggers in between.
    pub fn detach(&mut self) {
        self.last_lines = 0;
    }
}

/// Global watch status: success
pub fn status_success(message: &str) {
    WATCH_STATUS.lock().success(message);
}

/// Global watch status: error
pub fn status_error(summary: &str, detail: &str) {
    WATCH_STATUS.lock().error(summary, detail);
}

/// Global watch status: warning
pub fn status_warning(detail: &str) {
    WATCH_STATUS.lock().warning(detail);
}

/// Global watch status: stop overwriting previous output
pub fn status_detach() {
    WATCH_STATUS.lock().detach();
}
