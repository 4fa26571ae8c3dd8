use std::path::{Path, PathBuf};

use thinar_platform::Target;

/// Paths under the deps directory for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    deps: PathBuf,
    target: Target,
}

impl Layout {
    pub fn new(deps: impl Into<PathBuf>, target: Target) -> Self {
        Self {
            deps: deps.into(),
            target,
        }
    }

    pub fn deps(&self) -> &Path {
        &self.deps
    }

    pub fn source(&self) -> PathBuf {
        self.deps.join("v8")
    }

    pub fn depot_tools(&self) -> PathBuf {
        self.deps.join("depot_tools")
    }

    pub fn gn(&self) -> PathBuf {
        self.depot_tools().join("gn")
    }

    pub fn ninja(&self) -> PathBuf {
        let name = if cfg!(target_os = "windows") { "ninja.exe" } else { "ninja" };
        self.depot_tools().join(name)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.deps.join(".build").join(self.target.dir_name())
    }

    /// Fat archive produced by the build.
    pub fn monolith(&self) -> PathBuf {
        self.build_dir().join("obj").join("libv8_monolith.a")
    }

    /// Per-target directory holding patches, `zlib.gn` and the outputs.
    pub fn target_dir(&self) -> PathBuf {
        self.deps.join(self.target.dir_name())
    }

    pub fn thin_archive(&self) -> PathBuf {
        self.target_dir().join("libv8.a")
    }

    pub fn staging(&self) -> PathBuf {
        self.target_dir().join("obj")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thinar_platform::{Arch, TargetOs};

    #[test]
    fn output_paths() {
        let layout = Layout::new("/deps", Target::new(TargetOs::Linux, Arch::X86_64));
        assert_eq!(layout.monolith(), Path::new("/deps/.build/linux_x86_64/obj/libv8_monolith.a"));
        assert_eq!(layout.thin_archive(), Path::new("/deps/linux_x86_64/libv8.a"));
        assert_eq!(layout.staging(), Path::new("/deps/linux_x86_64/obj"));
        assert_eq!(layout.source(), Path::new("/deps/v8"));
        assert_eq!(layout.gn(), Path::new("/deps/depot_tools/gn"));
    }
}
