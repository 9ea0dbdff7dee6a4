//! Core types - pure abstractions shared across the codebase.

mod mode;
mod state;

pub use mode::RunMode;
pub use state::{begin_update, end_update, is_interrupted, is_shutdown, setup_shutdown_handler};
