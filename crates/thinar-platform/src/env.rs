use crate::error::{Error, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn paths_equal(p1: &Path, p2: &Path) -> bool {
    fn normalize(p: &Path) -> String {
        let s = p.to_string_lossy().trim_end_matches(['/', '\\']).to_string();
        if cfg!(target_os = "windows") {
            s.to_lowercase()
        } else {
            s
        }
    }
    normalize(p1) == normalize(p2)
}

/// Edits a copy of `PATH` for a child process; the current process
/// environment is left untouched.
#[derive(Debug, Clone)]
pub struct PathModifier {
    paths: Vec<PathBuf>,
}

impl Default for PathModifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PathModifier {
    pub fn new() -> Self {
        Self {
            paths: path_env().unwrap_or_default(),
        }
    }

    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn prepend(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.paths.retain(|p| !paths_equal(p, &path));
        self.paths.insert(0, path);
        self
    }

    pub fn build(self) -> Result<OsString> {
        env::join_paths(self.paths).map_err(|_| Error::JoinPaths)
    }
}

pub fn path_env() -> Option<Vec<PathBuf>> {
    env::var_os("PATH").map(|val| env::split_paths(&val).collect())
}
