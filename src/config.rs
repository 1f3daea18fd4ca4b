//! Startup configuration: defaults, `~/.wishrc` and environment overrides.
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;
use rustyline::EditMode;

use crate::parse::Limits;
use crate::search_path::DEFAULT_SEARCH_DIR;

pub const DEFAULT_PROMPT: &str = "wish> ";
pub const RC_FILE: &str = ".wishrc";
pub const HISTORY_FILE: &str = ".wish_history";

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub prompt: String,
    /// Initial search path; `path` replaces it at runtime.
    pub search_path: Vec<String>,
    pub limits: Limits,
    pub edit_mode: EditMode,
    pub history: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            search_path: vec![DEFAULT_SEARCH_DIR.to_string()],
            limits: Limits::unbounded(),
            edit_mode: EditMode::Emacs,
            history: true,
        }
    }
}

/// A problem on one line of the rc file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    pub line: usize,
    pub message: String,
}

pub fn home_file(name: &str) -> Option<PathBuf> {
    env::var("HOME").ok().map(|home| PathBuf::from(home).join(name))
}

/// Load `~/.wishrc` into `config`, then apply environment overrides.
///
/// Bad lines are reported on stderr and skipped; a missing file is fine.
pub fn load_config(config: &mut ShellConfig) -> io::Result<()> {
    if let Some(path) = home_file(RC_FILE) {
        match fs::read_to_string(&path) {
            Ok(content) => {
                for diag in apply_config_text(config, &content) {
                    eprintln!("config:{}: {}", diag.line, diag.message);
                }
                debug!("config event=loaded path={}", path.display());
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    apply_env(config);
    Ok(())
}

pub fn apply_env(config: &mut ShellConfig) {
    if let Ok(mode) = env::var("WISH_EDITMODE") {
        if let Some(mode) = parse_edit_mode(&mode) {
            config.edit_mode = mode;
        }
    }
}

pub fn apply_config_text(config: &mut ShellConfig, content: &str) -> Vec<ConfigDiagnostic> {
    let mut diagnostics = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(message) = apply_directive(config, line) {
            diagnostics.push(ConfigDiagnostic {
                line: idx + 1,
                message,
            });
        }
    }
    diagnostics
}

fn apply_directive(config: &mut ShellConfig, line: &str) -> Result<(), String> {
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| "unrecognized directive".to_string())?;
    let key = key.trim().to_ascii_lowercase();
    let value = strip_quotes(value.trim());
    match key.as_str() {
        "prompt" => config.prompt = value.to_string(),
        "path" => {
            config.search_path = value.split_whitespace().map(str::to_string).collect();
        }
        "limits" => {
            config.limits = match value.to_ascii_lowercase().as_str() {
                "compat" | "compatible" => Limits::compatible(),
                "none" | "unbounded" => Limits::unbounded(),
                _ => return Err(format!("invalid limits '{value}'")),
            };
        }
        "max_line" => config.limits.max_line_len = parse_limit(value)?,
        "max_segments" => config.limits.max_segments = parse_limit(value)?,
        "max_args" => config.limits.max_args = parse_limit(value)?,
        "editmode" => {
            config.edit_mode =
                parse_edit_mode(value).ok_or_else(|| format!("invalid editmode '{value}'"))?;
        }
        "history" => config.history = parse_switch(value)?,
        _ => return Err(format!("unknown key '{key}'")),
    }
    Ok(())
}

fn parse_limit(value: &str) -> Result<Option<usize>, String> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(0) => Err("limit must be positive".to_string()),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(format!("invalid limit '{value}'")),
    }
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(format!("invalid switch '{value}'")),
    }
}

fn parse_edit_mode(value: &str) -> Option<EditMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "vi" => Some(EditMode::Vi),
        "emacs" => Some(EditMode::Emacs),
        _ => None,
    }
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}
