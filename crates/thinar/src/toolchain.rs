//! Compiler and archiver choice per target.

use std::path::{Path, PathBuf};

use thinar_archive::CaseMangling;
use thinar_platform::{Arch, Target, TargetOs};

const BUNDLED_LLVM_AR: &str = "third_party/llvm-build/Release+Asserts/bin/llvm-ar";
const GCC_ARM64_AR: &str = "aarch64-linux-gnu-ar";
const SYSTEM_AR: &str = "ar";

/// The bundled clang is used everywhere except Linux, where the system GCC is.
pub fn default_clang(os: TargetOs) -> bool {
    os != TargetOs::Linux
}

/// Archiver matching the compiler that produced the archive.
///
/// GCC cross-builds for linux/arm64 use the cross binutils `ar`; clang builds
/// use the `llvm-ar` shipped in the source tree when it is present and
/// executable; everything else falls back to `ar` on `PATH`.
pub fn archiver(source_dir: &Path, target: Target, clang: bool) -> PathBuf {
    if target.os == TargetOs::Linux && target.arch == Arch::Arm64 && !clang {
        return PathBuf::from(GCC_ARM64_AR);
    }

    let bundled = source_dir.join(BUNDLED_LLVM_AR);
    if clang && is_executable(&bundled) {
        bundled
    } else {
        PathBuf::from(SYSTEM_AR)
    }
}

pub fn mangling(os: TargetOs) -> CaseMangling {
    CaseMangling::for_target(os)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(os: TargetOs, arch: Arch) -> Target {
        Target::new(os, arch)
    }

    #[test]
    fn clang_default() {
        assert!(!default_clang(TargetOs::Linux));
        assert!(default_clang(TargetOs::Darwin));
        assert!(default_clang(TargetOs::Windows));
    }

    #[test]
    fn gcc_arm64_linux_uses_cross_ar() {
        let dir = tempfile::tempdir().unwrap();
        let ar = archiver(dir.path(), target(TargetOs::Linux, Arch::Arm64), false);
        assert_eq!(ar, PathBuf::from("aarch64-linux-gnu-ar"));
    }

    #[test]
    fn clang_without_bundled_ar_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let ar = archiver(dir.path(), target(TargetOs::Darwin, Arch::Arm64), true);
        assert_eq!(ar, PathBuf::from("ar"));
    }

    #[cfg(unix)]
    #[test]
    fn clang_prefers_bundled_llvm_ar() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let llvm_ar = dir.path().join(BUNDLED_LLVM_AR);
        std::fs::create_dir_all(llvm_ar.parent().unwrap()).unwrap();
        std::fs::write(&llvm_ar, "#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&llvm_ar, std::fs::Permissions::from_mode(0o644)).unwrap();
        let linux = target(TargetOs::Linux, Arch::X86_64);
        assert_eq!(archiver(dir.path(), linux, true), PathBuf::from("ar"));

        std::fs::set_permissions(&llvm_ar, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(archiver(dir.path(), linux, true), llvm_ar);
        assert_eq!(archiver(dir.path(), linux, false), PathBuf::from("ar"));
    }
}
