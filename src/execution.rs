//! Per-line execution: segment, dispatch every command, then reap.
//!
//! All external commands of a line are started before any of them is waited
//! on, so `&`-joined commands run in parallel. Builtins run inline in dispatch
//! order, which means a `cd` or `path` affects the segments after it.
use std::io;
use std::process::{Child, ExitStatus};

use log::{debug, warn};

use crate::builtins::{execute_builtin, BuiltinOutcome};
use crate::error::report_error;
use crate::parse::{split_line, Limits};
use crate::search_path::SearchPath;

mod redirection;
mod spawning;

pub use spawning::launch;

/// A started child. Consumed by `wait`, so it is reaped at most once.
#[derive(Debug)]
pub struct ChildHandle {
    child: Child,
    command: String,
}

impl ChildHandle {
    pub(crate) fn new(child: Child, command: String) -> Self {
        Self { child, command }
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn wait(mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait()?;
        debug!(
            "job event=reap pid={} status={} command={:?}",
            self.child.id(),
            status,
            self.command
        );
        Ok(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Every child started by the line has been reaped.
    Done { reaped: usize },
    /// `exit` ran; children started earlier in the line were left running.
    Exit { abandoned: usize },
}

/// Run one input line to completion.
///
/// Each failure is reported once and only abandons its own segment.
pub fn execute_line(line: &str, search_path: &mut SearchPath, limits: &Limits) -> LineOutcome {
    if let Some(max) = limits.max_line_len.filter(|max| line.chars().count() > *max) {
        debug!("line event=truncated max_line={max}");
    }
    let command_line = split_line(line, limits);
    if command_line.is_empty() {
        return LineOutcome::Done { reaped: 0 };
    }
    debug!("line event=dispatch segments={}", command_line.len());

    let mut pending = Vec::new();
    for segment in command_line {
        let cmd = match segment {
            Ok(cmd) => cmd,
            Err(err) => {
                report_error(&err);
                continue;
            }
        };

        if let Some(result) = execute_builtin(&cmd, search_path) {
            match result {
                Ok(BuiltinOutcome::Continue) => {}
                Ok(BuiltinOutcome::Exit) => {
                    debug!("line event=exit abandoned={}", pending.len());
                    return LineOutcome::Exit {
                        abandoned: pending.len(),
                    };
                }
                Err(err) => report_error(&err),
            }
            continue;
        }

        match launch(&cmd, search_path) {
            Ok(child) => pending.push(child),
            Err(err) => report_error(&err),
        }
    }

    LineOutcome::Done {
        reaped: wait_all(pending),
    }
}

/// Wait for every handle; exit statuses are not propagated.
pub fn wait_all(pending: Vec<ChildHandle>) -> usize {
    let mut reaped = 0usize;
    for child in pending {
        let pid = child.id();
        match child.wait() {
            Ok(_) => reaped += 1,
            Err(err) => warn!("job event=wait-failed pid={pid} error={err}"),
        }
    }
    reaped
}
