//! The read-execute loop and the state it owns.
use std::io;

use log::debug;

use crate::config::ShellConfig;
use crate::execution::{execute_line, LineOutcome};
use crate::io_helpers::{strip_newline, LineSource};
use crate::parse::{trim_segment, Limits};
use crate::search_path::SearchPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prompt before every read.
    Interactive,
    /// Script input; nothing is written besides command output.
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Eof,
    /// The `exit` builtin ran.
    Exit,
}

/// Process-wide shell state. Lines are handled strictly one after another.
pub struct Session {
    search_path: SearchPath,
    mode: Mode,
    prompt: String,
    limits: Limits,
}

impl Session {
    pub fn new(mode: Mode, config: &ShellConfig) -> Self {
        Self {
            search_path: SearchPath::new(config.search_path.iter().cloned()),
            mode,
            prompt: config.prompt.clone(),
            limits: config.limits,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    fn prompt(&self) -> Option<&str> {
        match self.mode {
            Mode::Interactive => Some(self.prompt.as_str()),
            Mode::Batch => None,
        }
    }

    /// Read and run one line. `None` means keep going.
    pub fn run_once(&mut self, source: &mut dyn LineSource) -> io::Result<Option<SessionEnd>> {
        let Some(raw) = source.read_line(self.prompt())? else {
            debug!("session event=eof");
            return Ok(Some(SessionEnd::Eof));
        };
        let line = strip_newline(&raw);
        if trim_segment(line).is_empty() {
            return Ok(None);
        }
        match self.execute(line) {
            LineOutcome::Done { .. } => Ok(None),
            LineOutcome::Exit { .. } => Ok(Some(SessionEnd::Exit)),
        }
    }

    pub fn run(&mut self, source: &mut dyn LineSource) -> io::Result<SessionEnd> {
        loop {
            if let Some(end) = self.run_once(source)? {
                return Ok(end);
            }
        }
    }

    pub fn execute(&mut self, line: &str) -> LineOutcome {
        execute_line(line, &mut self.search_path, &self.limits)
    }
}
