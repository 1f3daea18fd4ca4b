//! Line sources feeding the session loop.
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::warn;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, EditMode, Editor};

/// Produces raw input lines. `Ok(None)` is end of input.
pub trait LineSource {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>>;
}

/// Plain buffered reader: batch scripts, or stdin when it is not a terminal.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        if let Some(prompt) = prompt {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Invalid UTF-8 is replaced, not rejected.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Line editor for interactive terminals.
pub struct EditorSource {
    editor: Editor<(), DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(edit_mode: EditMode, history_path: Option<PathBuf>) -> io::Result<Self> {
        let config = Config::builder()
            .auto_add_history(true)
            .edit_mode(edit_mode)
            .build();
        let mut editor = Editor::with_config(config).map_err(io::Error::other)?;
        if let Some(ref path) = history_path {
            // A missing history file is normal on first run.
            let _ = editor.load_history(path);
        }
        Ok(Self {
            editor,
            history_path,
        })
    }

    pub fn save_history(&mut self) {
        if let Some(ref path) = self.history_path {
            if let Err(err) = self.editor.save_history(path) {
                warn!("history event=save path={} error={}", path.display(), err);
            }
        }
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        match self.editor.readline(prompt.unwrap_or("")) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(io::Error::other(err)),
        }
    }
}

impl Drop for EditorSource {
    fn drop(&mut self) {
        self.save_history();
    }
}

/// Drop one trailing `\n` (and a `\r` before it) left by the reader.
pub fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
