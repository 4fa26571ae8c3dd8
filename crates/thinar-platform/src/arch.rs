//! Target CPU architecture.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// CPU architectures the library can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Arm64,
    X86_64,
}

impl Arch {
    /// Detect the host architecture, `None` if it is not a buildable one.
    pub fn host() -> Option<Self> {
        sysinfo::System::cpu_arch().parse().ok()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::X86_64 => "x86_64",
        }
    }

    /// Name used by the build-file generator (`target_cpu`).
    pub fn gn_name(self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::X86_64 => "x64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            "x86_64" | "amd64" | "x64" => Ok(Arch::X86_64),
            _ => Err(Error::UnknownArch(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("aarch64".parse::<Arch>().unwrap(), Arch::Arm64);
        assert_eq!("AMD64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert!("riscv64".parse::<Arch>().is_err());
    }

    #[test]
    fn test_gn_name() {
        assert_eq!(Arch::X86_64.gn_name(), "x64");
        assert_eq!(Arch::Arm64.gn_name(), "arm64");
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_host_x86_64() {
        assert_eq!(Arch::host(), Some(Arch::X86_64));
    }
}
