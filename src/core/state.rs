//! Session state shared with the Ctrl+C handler.
//!
//! Three flags:
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C outside a reload cycle)
//! - `BUSY`: Is a pre-reload → recompile → reload cycle running?
//! - `INTERRUPTED`: Was the running cycle cancelled by Ctrl+C?
//!
//! Ctrl+C is two-tiered: while `BUSY` it only cancels the current cycle
//! (the compiler child receives the same SIGINT from the terminal) and the
//! viewer is kept; otherwise it ends the session.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// A reload cycle is in progress
static BUSY: AtomicBool = AtomicBool::new(false);

/// The current reload cycle received Ctrl+C
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(on_interrupt)
        .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

fn on_interrupt() {
    if is_busy() {
        INTERRUPTED.store(true, Ordering::SeqCst);
    } else {
        SHUTDOWN.store(true, Ordering::SeqCst);
    }
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// BUSY state
// =============================================================================

/// Check if a reload cycle is in progress
pub fn is_busy() -> bool {
    BUSY.load(Ordering::Acquire)
}

/// Mark a reload cycle as started
pub fn begin_update() {
    INTERRUPTED.store(false, Ordering::SeqCst);
    BUSY.store(true, Ordering::Release);
}

/// Check if the running reload cycle was cancelled (flag is kept)
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::Acquire)
}

/// Mark a reload cycle as finished
///
/// Returns `true` if Ctrl+C arrived while it ran. The flag is consumed.
pub fn end_update() -> bool {
    BUSY.store(false, Ordering::Release);
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

// =============================================================================
// Tests
// =============================================================================
