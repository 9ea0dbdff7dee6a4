//! What a session does after compiling.

/// Run mode selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// `-p`: compile once.
    #[default]
    Compile,
    /// `--pv`: compile once and open the output.
    Preview,
    /// `--pvc`: compile, open, and keep the viewer in sync.
    Continuous,
}
