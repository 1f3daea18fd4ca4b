//! Ordered directory list used to resolve bare command names.
use std::path::PathBuf;

use log::debug;
use nix::unistd::{access, AccessFlags};

pub const DEFAULT_SEARCH_DIR: &str = "/bin";

/// Directories are tried in insertion order; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<String>,
}

impl SearchPath {
    pub fn new<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace every entry. An empty list leaves nothing resolvable.
    pub fn replace<I, S>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs = dirs.into_iter().map(Into::into).collect();
        debug!("path event=replace dirs={:?}", self.dirs);
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// First `dir/name` that passes an execute-permission check.
    ///
    /// The join is textual, so an absolute `name` is appended to each
    /// directory rather than used as is. Nothing is cached.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.dirs.iter().find_map(|dir| {
            let candidate = PathBuf::from(format!("{dir}/{name}"));
            match access(candidate.as_path(), AccessFlags::X_OK) {
                Ok(()) => Some(candidate),
                Err(_) => None,
            }
        })
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new([DEFAULT_SEARCH_DIR])
    }
}
