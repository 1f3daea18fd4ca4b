#![cfg(target_os = "linux")]

use std::fs;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

struct Run {
    stdout: String,
    stderr: String,
    code: i32,
}

fn shell(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wish"));
    cmd.env("HOME", home)
        .env_remove("WISH_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn finish(mut child: std::process::Child, input: &str) -> Run {
    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin.write_all(input.as_bytes()).expect("write");
    }
    let output = child.wait_with_output().expect("wait");
    Run {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code().unwrap_or(-1),
    }
}

/// Run `script` as a batch file.
fn run_script(dir: &TempDir, script: impl AsRef<[u8]>) -> Run {
    let path = dir.path().join("script.wish");
    fs::write(&path, script).expect("write script");
    let child = shell(dir.path())
        .arg(&path)
        .current_dir(dir.path())
        .spawn()
        .expect("spawn shell");
    finish(child, "")
}

/// Feed `input` on stdin in interactive mode.
fn run_interactive(dir: &TempDir, input: &str) -> Run {
    let child = shell(dir.path())
        .current_dir(dir.path())
        .spawn()
        .expect("spawn shell");
    finish(child, input)
}

#[test]
fn batch_runs_commands_without_prompt() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, "echo one\necho two\n");
    assert_eq!(run.stdout, "one\ntwo\n");
    assert_eq!(run.stderr, "");
    assert_eq!(run.code, 0);
}

#[test]
fn interactive_prints_prompt_before_each_read() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_interactive(&dir, "echo hi\n");
    assert_eq!(run.stdout, "wish> hi\nwish> ");
    assert_eq!(run.code, 0);
}

#[test]
fn redirect_keeps_session_stdout_clean() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, "echo hi > out.txt\n");
    assert_eq!(run.stdout, "");
    assert_eq!(run.stderr, "");
    let content = fs::read_to_string(dir.path().join("out.txt")).expect("out.txt");
    assert_eq!(content, "hi\n");
}

#[test]
fn error_messages_are_exact() {
    let dir = TempDir::new().expect("tempdir");
    let script = "\
nosuchcommand-wish
cd
cd a b
exit now
echo a > x > y
echo a >
echo a > x y
cd /no/such/dir/for/wish
";
    let run = run_script(&dir, script);
    assert_eq!(run.stdout, "");
    assert_eq!(
        run.stderr,
        "wish: command not found\n\
wish: cd requires one argument\n\
wish: cd requires one argument\n\
wish: exit takes no arguments\n\
wish: redirection error\n\
wish: redirection error\n\
wish: redirection error\n\
An error has occurred\n"
    );
    assert!(!dir.path().join("x").exists());
    assert!(!dir.path().join("y").exists());
    assert_eq!(run.code, 0);
}

#[test]
fn exit_with_arguments_does_not_terminate() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, "exit extra\necho after\n");
    assert_eq!(run.stdout, "after\n");
    assert_eq!(run.stderr, "wish: exit takes no arguments\n");
    assert_eq!(run.code, 0);
}

#[test]
fn exit_terminates_immediately() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, "echo before\nexit\necho after\n");
    assert_eq!(run.stdout, "before\n");
    assert_eq!(run.code, 0);
}

#[test]
fn empty_path_disables_externals_until_reset() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, "path\necho one\necho two & echo three\npath /bin /usr/bin\necho four\n");
    assert_eq!(run.stdout, "four\n");
    assert_eq!(run.stderr, "wish: command not found\n".repeat(3));
}

#[test]
fn path_order_decides_resolution() {
    let dir = TempDir::new().expect("tempdir");
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    for (bin, word) in [(&first, "first"), (&second, "second")] {
        fs::create_dir(bin).expect("mkdir");
        let tool = bin.join("tool");
        fs::write(&tool, format!("#!/bin/sh\necho {word}\n")).expect("write tool");
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).expect("chmod");
    }
    let script = "path second first\ntool\npath first second\ntool\npath first\n/bin/echo x\n";
    let run = run_script(&dir, script);
    assert_eq!(run.stdout, "second\nfirst\n");
    assert_eq!(run.stderr, "wish: command not found\n");
}

#[test]
fn cd_pair_applies_in_order() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("a/b")).expect("mkdir");
    let run = run_script(&dir, "cd a & cd b & echo x > marker\npwd\n");
    assert_eq!(run.stderr, "");
    let marker = dir.path().join("a/b/marker");
    assert_eq!(fs::read_to_string(marker).expect("marker"), "x\n");
    let root = dir.path().canonicalize().expect("canonical");
    let pwd = run.stdout.trim_end();
    assert!(
        Path::new(pwd) == root.join("a/b") || pwd.ends_with("/a/b"),
        "pwd: {pwd}"
    );
}

#[test]
fn parallel_line_is_reaped_before_next_line() {
    let dir = TempDir::new().expect("tempdir");
    let script = "sleep 0.3 & echo first > early.txt\nls\n";
    let run = run_script(&dir, script);
    // `ls` only runs after both siblings finished, so it sees early.txt.
    assert!(run.stdout.contains("early.txt"), "{}", run.stdout);
}

#[test]
fn builtins_ignore_redirection() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, "path /bin /usr/bin > ignored.txt\necho ok\n");
    assert_eq!(run.stdout, "ok\n");
    assert!(!dir.path().join("ignored.txt").exists());
}

#[test]
fn too_many_arguments_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let child = shell(dir.path())
        .args(["a", "b"])
        .spawn()
        .expect("spawn shell");
    let run = finish(child, "");
    assert_eq!(run.stderr, "An error has occurred\n");
    assert_eq!(run.code, 1);
}

#[test]
fn missing_script_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let child = shell(dir.path())
        .arg(dir.path().join("missing.wish"))
        .spawn()
        .expect("spawn shell");
    let run = finish(child, "");
    assert_eq!(run.stderr, "An error has occurred\n");
    assert_eq!(run.code, 1);
}

#[test]
fn rc_file_overrides_prompt_and_path() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join(".wishrc"), "prompt = \"$ \"\npath = /usr/bin /bin\n")
        .expect("write rc");
    let run = run_interactive(&dir, "echo hi\n");
    assert_eq!(run.stdout, "$ hi\n$ ");
    assert_eq!(run.stderr, "");
}

#[test]
fn invalid_utf8_line_does_not_end_the_session() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, b"echo before\necho caf\xe9\necho after\n");
    assert_eq!(run.stdout, "before\ncaf\u{fffd}\nafter\n");
    assert_eq!(run.stderr, "");
    assert_eq!(run.code, 0);
}

#[test]
fn script_path_need_not_be_utf8() {
    let dir = TempDir::new().expect("tempdir");
    let script = dir.path().join(std::ffi::OsStr::from_bytes(b"scr\xffipt"));
    fs::write(&script, "echo ran\n").expect("write script");
    let child = shell(dir.path()).arg(&script).spawn().expect("spawn shell");
    let run = finish(child, "");
    assert_eq!(run.stdout, "ran\n");
    assert_eq!(run.code, 0);
}

#[test]
fn vertical_tab_is_a_command_not_a_blank() {
    let dir = TempDir::new().expect("tempdir");
    let run = run_script(&dir, "\x0b\n");
    assert_eq!(run.stderr, "wish: command not found\n");
}

#[test]
fn unexecutable_program_fails_alike_with_and_without_redirect() {
    let dir = TempDir::new().expect("tempdir");
    let bin = dir.path().join("bin");
    fs::create_dir(&bin).expect("mkdir");
    let bad = bin.join("bad");
    fs::write(&bad, b"\x01garbage\n").expect("write bad");
    fs::set_permissions(&bad, fs::Permissions::from_mode(0o755)).expect("chmod");
    let script = format!(
        "path {} /bin /usr/bin\nbad & echo sib\nbad > f.txt & echo sib2\n",
        bin.display()
    );
    let run = run_script(&dir, script);
    assert_eq!(run.stdout, "sib\nsib2\n");
    assert_eq!(run.stderr, "An error has occurred\n".repeat(2));
    let redirected = fs::read_to_string(dir.path().join("f.txt")).expect("f.txt");
    assert_eq!(redirected, "");
    assert_eq!(run.code, 0);
}
