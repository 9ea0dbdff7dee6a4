//! Source change detection by metadata polling.

use std::path::Path;
use std::time::SystemTime;

/// Metadata observed for the source on one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStamp {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

/// Reads a [`SourceStamp`]. `None` when the file cannot be read right now.
pub trait SourceProbe {
    fn stamp(&mut self, path: &Path) -> Option<SourceStamp>;
}

/// Reads stamps from the file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl SourceProbe for FsProbe {
    fn stamp(&mut self, path: &Path) -> Option<SourceStamp> {
        let meta = path.metadata().ok()?;
        Some(SourceStamp {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Pure change detector: remembers the last stamp, no I/O.
#[derive(Debug, Default)]
pub struct WatchState {
    last: Option<SourceStamp>,
}

impl WatchState {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record `stamp`; `true` if it differs from the previous one.
    ///
    /// An unreadable source (editors that save by rename leave a short gap)
    /// keeps the previous stamp and is not a change.
    pub fn observe(&mut self, stamp: Option<SourceStamp>) -> bool {
        let Some(stamp) = stamp else {
            return false;
        };
        if self.last == Some(stamp) {
            return false;
        }
        self.last = Some(stamp);
        true
    }
}
