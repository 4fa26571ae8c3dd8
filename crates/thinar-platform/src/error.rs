use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    #[error("unknown operating system: {0}")]
    UnknownOS(String),

    #[error("command failed: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("command `{cmd}` exited with {}: {stderr}", code.map_or("signal".to_string(), |c| format!("status {c}")))]
    Status {
        cmd: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("command `{cmd}` produced non UTF-8 output")]
    NonUtf8Output { cmd: String },

    #[error("failed to join PATH entries")]
    JoinPaths,
}
