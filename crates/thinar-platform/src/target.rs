use crate::{Arch, TargetOs};
use std::fmt;

/// An (os, arch) pair; also names the per-target output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub os: TargetOs,
    pub arch: Arch,
}

impl Target {
    pub fn new(os: TargetOs, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// `linux_x86_64`, `darwin_arm64`, ...
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.os, self.arch)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir_name())
    }
}
