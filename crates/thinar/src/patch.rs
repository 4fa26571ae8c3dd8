//! MinGW support patches, applied when building on a Windows host.

use std::path::PathBuf;

use anyhow::{Context, Result};
use thinar_platform::Command;

use crate::layout::Layout;

/// Patch name and the source subdirectory it applies to.
const MINGW_PATCHES: [(&str, &str); 2] = [
    ("0000-add-mingw-main-code-changes", ""),
    ("0001-add-mingw-toolchain", "build"),
];

pub fn patch_path(layout: &Layout, name: &str) -> PathBuf {
    layout.target_dir().join(format!("{name}.patch"))
}

pub fn apply_mingw_patches(layout: &Layout) -> Result<()> {
    let source = layout.source();
    for (name, subdir) in MINGW_PATCHES {
        let patch = patch_path(layout, name);
        tracing::info!(patch = %patch.display(), "applying patch");
        Command::for_host("git")
            .args(["apply", "-v"])
            .arg(&patch)
            .current_dir(source.join(subdir))
            .run()
            .with_context(|| format!("Failed to apply {}", patch.display()))?;
    }

    update_last_change(layout)?;

    let zlib_src = layout.target_dir().join("zlib.gn");
    let zlib_dst = source.join("third_party").join("zlib").join("BUILD.gn");
    std::fs::copy(&zlib_src, &zlib_dst).with_context(|| {
        format!("Failed to copy {} to {}", zlib_src.display(), zlib_dst.display())
    })?;
    Ok(())
}

/// Regenerates `build/util/LASTCHANGE`, which the patched toolchain reads.
fn update_last_change(layout: &Layout) -> Result<()> {
    let out = layout.source().join("build").join("util").join("LASTCHANGE");
    Command::for_host("python")
        .args(["build/util/lastchange.py", "-o"])
        .arg(&out)
        .current_dir(layout.source())
        .run()
        .context("Failed to update LASTCHANGE")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use thinar_platform::{Arch, Target, TargetOs};

    #[test]
    fn patches_live_in_target_dir() {
        let layout = Layout::new("/deps", Target::new(TargetOs::Windows, Arch::X86_64));
        assert_eq!(
            patch_path(&layout, "0001-add-mingw-toolchain"),
            Path::new("/deps/windows_x86_64/0001-add-mingw-toolchain.patch")
        );
    }
}
