//! In-process commands: `exit`, `cd` and `path`.
//!
//! Builtins run synchronously in the shell's own process and never fork, so
//! their effects are visible to every segment dispatched after them.
use std::env;

use log::debug;

use crate::error::{ShellError, ShellResult};
use crate::parse::CommandSpec;
use crate::search_path::SearchPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Path,
}

/// What the caller should do after a builtin succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Continue,
    /// Stop the session now, without waiting on anything.
    Exit,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::Cd),
            "path" => Some(Builtin::Path),
            _ => None,
        }
    }

    /// Run with the full argv (`args[0]` is the builtin's own name).
    pub fn run(self, args: &[String], search_path: &mut SearchPath) -> ShellResult<BuiltinOutcome> {
        let operands = args.get(1..).unwrap_or_default();
        match self {
            Builtin::Exit => {
                if !operands.is_empty() {
                    return Err(ShellError::ExitArity);
                }
                Ok(BuiltinOutcome::Exit)
            }
            Builtin::Cd => {
                let [target] = operands else {
                    return Err(ShellError::CdArity);
                };
                env::set_current_dir(target)?;
                debug!("builtin event=cd dir={target}");
                Ok(BuiltinOutcome::Continue)
            }
            Builtin::Path => {
                search_path.replace(operands.iter().cloned());
                Ok(BuiltinOutcome::Continue)
            }
        }
    }
}

/// Run `cmd` if it names a builtin; `None` means it is an external command.
///
/// A redirection target on a builtin is ignored.
pub fn execute_builtin(
    cmd: &CommandSpec,
    search_path: &mut SearchPath,
) -> Option<ShellResult<BuiltinOutcome>> {
    let builtin = Builtin::lookup(cmd.name())?;
    Some(builtin.run(cmd.args(), search_path))
}
