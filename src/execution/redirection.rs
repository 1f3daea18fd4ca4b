use std::fs;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::process::{Command, Stdio};

use nix::unistd::dup2;

/// Make `target` the stdout of `command`, creating or truncating it.
///
/// The file is opened in the parent so a bad target fails before anything is
/// spawned. The parent's copy is released when `command` is dropped.
pub(crate) fn apply_output_redirection(command: &mut Command, target: &str) -> io::Result<()> {
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(target)?;
    command.stdout(Stdio::from(file));
    Ok(())
}

/// Point stderr at whatever stdout is. Runs in the child between fork and exec.
pub(crate) fn merge_stderr() -> io::Result<()> {
    dup2(libc::STDOUT_FILENO, libc::STDERR_FILENO)?;
    Ok(())
}
