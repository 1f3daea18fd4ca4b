use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Command;

use log::debug;
use nix::unistd::execv;

use crate::error::{ShellError, ShellResult};
use crate::parse::CommandSpec;
use crate::search_path::SearchPath;

use super::redirection::{apply_output_redirection, merge_stderr};
use super::ChildHandle;

/// Program and argv as C strings, built before fork.
struct ExecImage {
    program: CString,
    argv: Vec<CString>,
}

impl ExecImage {
    fn new(program: &Path, args: &[String]) -> io::Result<Self> {
        let program = CString::new(program.as_os_str().as_bytes())?;
        let argv = args
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { program, argv })
    }

    /// Replace the process image; only returns on failure.
    fn exec(&self) -> io::Error {
        match execv(&self.program, self.argv.as_slice()) {
            Ok(never) => match never {},
            Err(errno) => io::Error::from(errno),
        }
    }
}

/// Build the command for an already-resolved program.
///
/// argv is passed through unchanged, including `args[0]` as typed. The child
/// execs the program itself from `pre_exec`, so an image the kernel rejects
/// fails the spawn whether or not the command is redirected.
fn build_command(program: &Path, cmd: &CommandSpec) -> io::Result<Command> {
    let mut command = Command::new(program);
    command.arg0(cmd.name()).args(&cmd.args()[1..]);

    let redirected = match cmd.redirect() {
        Some(target) => {
            apply_output_redirection(&mut command, target)?;
            true
        }
        None => false,
    };

    let image = ExecImage::new(program, cmd.args())?;
    set_pre_exec(&mut command, move || {
        if redirected {
            merge_stderr()?;
        }
        Err(image.exec())
    });
    Ok(command)
}

fn set_pre_exec<F>(command: &mut Command, f: F)
where
    F: FnMut() -> io::Result<()> + Send + Sync + 'static,
{
    unsafe {
        command.pre_exec(f);
    }
}

/// Resolve and start `cmd` without waiting on it.
pub fn launch(cmd: &CommandSpec, search_path: &SearchPath) -> ShellResult<ChildHandle> {
    let Some(program) = search_path.resolve(cmd.name()) else {
        debug!("job event=unresolved name={}", cmd.name());
        return Err(ShellError::CommandNotFound(cmd.name().to_string()));
    };
    let mut command =
        build_command(&program, cmd).map_err(|err| wrap_spawn_error(&program, err))?;
    let child = command
        .spawn()
        .map_err(|err| wrap_spawn_error(&program, err))?;
    debug!(
        "job event=spawn pid={} program={} redirect={:?}",
        child.id(),
        program.display(),
        cmd.redirect()
    );
    Ok(ChildHandle::new(child, cmd.display()))
}

fn wrap_spawn_error(program: &Path, err: io::Error) -> ShellError {
    debug!("job event=spawn-failed program={} error={}", program.display(), err);
    ShellError::Os(err)
}
