use std::io;
use std::path::PathBuf;

use crate::archiver::Operation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("archiver {operation} failed: {source}")]
    ExternalTool {
        operation: Operation,
        source: thinar_platform::Error,
    },

    #[error("staged member '{member}' of group {group} not found at '{path}'")]
    MissingStaged {
        member: String,
        group: usize,
        path: PathBuf,
    },

    #[error("unexpected file '{path}' in staging directory")]
    UnexpectedStaged { path: PathBuf },

    #[error("failed to prepare '{path}': {source}")]
    Precondition { path: PathBuf, source: io::Error },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("cannot express '{path}' relative to '{base}'")]
    NotRelative { path: PathBuf, base: PathBuf },
}

/// Coarse classification of [`Error`]. None of them is retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An archiver invocation could not be spawned or exited non-zero.
    ExternalTool,
    /// The staging directory does not hold exactly the expected files.
    Consistency,
    /// A path could not be prepared or expressed.
    Precondition,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ExternalTool { .. } => ErrorKind::ExternalTool,
            Self::MissingStaged { .. } | Self::UnexpectedStaged { .. } => ErrorKind::Consistency,
            Self::Precondition { .. } | Self::Rename { .. } | Self::NotRelative { .. } => {
                ErrorKind::Precondition
            }
        }
    }

    pub(crate) fn precondition(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Precondition { path, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
