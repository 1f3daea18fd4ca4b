use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::process;

use wish::config::{home_file, load_config, ShellConfig, HISTORY_FILE};
use wish::io_helpers::{EditorSource, LineSource, ReaderSource};
use wish::repl::{Mode, Session, SessionEnd};
use wish::{report_error, ShellError};

fn main() {
    init_logging();
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    if args.len() > 1 {
        report_error(&ShellError::Startup(format!(
            "expected at most one script, got {}",
            args.len()
        )));
        process::exit(1);
    }

    let mut config = ShellConfig::default();
    if let Err(err) = load_config(&mut config) {
        eprintln!("config error: {err}");
    }

    let result = match args.first() {
        Some(script) => run_batch(Path::new(script), &config),
        None => run_interactive(&config),
    };
    match result {
        Ok(SessionEnd::Eof) | Ok(SessionEnd::Exit) => process::exit(0),
        Err(err) => {
            report_error(&err);
            process::exit(1);
        }
    }
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("WISH_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

fn run_batch(script: &Path, config: &ShellConfig) -> Result<SessionEnd, ShellError> {
    let file = File::open(script).map_err(|err| {
        ShellError::Startup(format!("cannot open script {}: {err}", script.display()))
    })?;
    let mut source = ReaderSource::new(BufReader::new(file));
    run_session(Mode::Batch, config, &mut source)
}

fn run_interactive(config: &ShellConfig) -> Result<SessionEnd, ShellError> {
    let on_terminal = unsafe { libc::isatty(libc::STDIN_FILENO) == 1 };
    if on_terminal {
        let history = if config.history {
            home_file(HISTORY_FILE)
        } else {
            None
        };
        let mut source = EditorSource::new(config.edit_mode, history)?;
        run_session(Mode::Interactive, config, &mut source)
    } else {
        let stdin = io::stdin();
        let mut source = ReaderSource::new(stdin.lock());
        run_session(Mode::Interactive, config, &mut source)
    }
}

fn run_session(
    mode: Mode,
    config: &ShellConfig,
    source: &mut dyn LineSource,
) -> Result<SessionEnd, ShellError> {
    let mut session = Session::new(mode, config);
    Ok(session.run(source)?)
}
