//! Recording host for tests: nothing is spawned, every action is journaled.

use super::{ProcessHost, ViewerProcess};
use crate::platform::{LaunchCommand, ViewerSignal};
use anyhow::{Result, bail};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Something that happened to a viewer (or the compiler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Compile,
    Launch(String),
    Signal(ViewerSignal),
    Terminate,
    Kill,
    Run(Vec<String>),
}

/// Shared, ordered event log.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }
}

#[derive(Debug, Default)]
pub struct MockHost {
    pub journal: Journal,
    /// Viewers ignore `terminate` (forces the kill escalation).
    stubborn: bool,
    /// Number of upcoming `spawn` calls that fail.
    failing: Cell<usize>,
    next_pid: Cell<u32>,
}

impl MockHost {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    pub fn stubborn(mut self) -> Self {
        self.stubborn = true;
        self
    }

    /// Every `spawn` fails.
    pub fn broken(self) -> Self {
        self.failing(usize::MAX)
    }

    /// The next `count` spawns fail.
    pub fn failing(self, count: usize) -> Self {
        self.failing.set(count);
        self
    }
}

impl ProcessHost for MockHost {
    type Process = MockViewer;

    fn spawn(&self, command: &LaunchCommand) -> Result<MockViewer> {
        let failing = self.failing.get();
        if failing > 0 {
            self.failing.set(failing.saturating_sub(1));
            bail!("cannot launch `{command}`");
        }
        self.journal.push(Event::Launch(command.to_string()));
        let pid = self.next_pid.get() + 1;
        self.next_pid.set(pid);
        Ok(MockViewer {
            journal: self.journal.clone(),
            command: command.clone(),
            pid,
            alive: true,
            stubborn: self.stubborn,
        })
    }

    fn run(&self, argv: &[String], _envs: &[(String, String)]) -> Result<()> {
        self.journal.push(Event::Run(argv.to_vec()));
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockViewer {
    journal: Journal,
    command: LaunchCommand,
    pub pid: u32,
    pub alive: bool,
    stubborn: bool,
}

impl ViewerProcess for MockViewer {
    fn command(&self) -> &LaunchCommand {
        &self.command
    }

    fn id(&self) -> Option<u32> {
        self.alive.then_some(self.pid)
    }

    fn signal(&mut self, signal: ViewerSignal) -> Result<()> {
        self.journal.push(Event::Signal(signal));
        Ok(())
    }

    fn terminate(&mut self) -> Result<()> {
        self.journal.push(Event::Terminate);
        if !self.stubborn {
            self.alive = false;
        }
        Ok(())
    }

    fn kill(&mut self) -> Result<()> {
        self.journal.push(Event::Kill);
        self.alive = false;
        Ok(())
    }

    fn wait_timeout(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.alive)
    }
}
