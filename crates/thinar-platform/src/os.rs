//! Target operating system.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use sysinfo::System;

/// Operating systems the library can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    Android,
    Ios,
    Linux,
    Darwin,
    Windows,
}

static HOST_OS: Lazy<Option<TargetOs>> = Lazy::new(|| match System::name().as_deref() {
    Some("Windows") => Some(TargetOs::Windows),
    Some("Darwin") | Some("macOS") => Some(TargetOs::Darwin),
    Some("Android") => Some(TargetOs::Android),
    Some(name) if name.starts_with("Linux") || name.contains("Linux") => Some(TargetOs::Linux),
    _ => std::env::consts::OS.parse().ok(),
});

impl TargetOs {
    pub const ALL: [TargetOs; 5] = [
        TargetOs::Android,
        TargetOs::Ios,
        TargetOs::Linux,
        TargetOs::Darwin,
        TargetOs::Windows,
    ];

    /// Detect the operating system of the running host.
    pub fn host() -> Option<Self> {
        *HOST_OS
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetOs::Android => "android",
            TargetOs::Ios => "ios",
            TargetOs::Linux => "linux",
            TargetOs::Darwin => "darwin",
            TargetOs::Windows => "windows",
        }
    }

    /// Name used by the build-file generator (`target_os`).
    pub fn gn_name(self) -> &'static str {
        match self {
            TargetOs::Darwin => "mac",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(TargetOs::Android),
            "ios" => Ok(TargetOs::Ios),
            "linux" => Ok(TargetOs::Linux),
            "darwin" | "macos" | "mac" => Ok(TargetOs::Darwin),
            "windows" => Ok(TargetOs::Windows),
            _ => Err(Error::UnknownOS(s.to_string())),
        }
    }
}
