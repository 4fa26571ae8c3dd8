//! Build configuration and compilation through `gn` and `ninja`.

use std::path::Path;

use anyhow::{Context, Result};
use thinar_platform::{Arch, Command, Target};

use crate::config::Settings;

/// Flags that never change: a static, monolithic, embedder-friendly library.
const FIXED_ARGS: &[(&str, &str)] = &[
    ("clang_use_chrome_plugins", "false"),
    ("use_custom_libcxx", "false"),
    ("use_sysroot", "false"),
    ("is_component_build", "false"),
    ("v8_monolithic", "true"),
    ("v8_use_external_startup_data", "false"),
    ("treat_warnings_as_errors", "false"),
    ("v8_embedder_string", "\"-v8go\""),
    ("v8_enable_gdbjit", "false"),
    ("v8_enable_i18n_support", "true"),
    ("icu_use_data_file", "false"),
    ("v8_enable_test_features", "false"),
    ("exclude_unwind_tables", "true"),
    ("v8_android_log_stdout", "true"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GnArgs {
    pub target: Target,
    pub debug: bool,
    pub clang: bool,
    pub ccache: bool,
}

impl From<&Settings> for GnArgs {
    fn from(settings: &Settings) -> Self {
        Self {
            target: settings.target,
            debug: settings.debug,
            clang: settings.clang,
            ccache: settings.ccache,
        }
    }
}

impl GnArgs {
    /// `key=value` pairs, one per line.
    pub fn render(&self) -> String {
        let cpu = format!("\"{}\"", self.target.arch.gn_name());
        // 1 keeps line numbers; 2 grows the library by an order of magnitude.
        let symbol_level = if self.debug { "1" } else { "0" };

        let mut args: Vec<(&str, String)> = vec![
            ("is_debug", self.debug.to_string()),
            ("is_clang", self.clang.to_string()),
            ("target_os", format!("\"{}\"", self.target.os.gn_name())),
            ("target_cpu", cpu.clone()),
            ("v8_target_cpu", cpu),
            ("symbol_level", symbol_level.to_string()),
            ("strip_debug_info", (!self.debug).to_string()),
        ];
        args.extend(FIXED_ARGS.iter().map(|(k, v)| (*k, v.to_string())));

        if self.ccache {
            args.push(("cc_wrapper", "\"ccache\"".to_string()));
        }
        if !self.clang && self.target.arch == Arch::Arm64 {
            // The bundled ICU passes -mmark-bti-property, which GCC rejects.
            args.push(("arm_control_flow_integrity", "\"none\"".to_string()));
        }

        args.iter().map(|(k, v)| format!("{k}={v}\n")).collect()
    }

    /// The single `--args=` value handed to `gn gen`.
    pub fn to_flag(&self) -> String {
        format!("--args={}", self.render().replace('\n', " "))
    }
}

pub fn generate(gn: &Path, source: &Path, build_dir: &Path, args: &GnArgs) -> Result<()> {
    tracing::info!(build_dir = %build_dir.display(), "generating build files");
    Command::for_host(gn)
        .arg("gen")
        .arg(build_dir)
        .arg(args.to_flag())
        .current_dir(source)
        .run()
        .context("gn gen failed")
}

pub fn compile(ninja: &Path, source: &Path, build_dir: &Path) -> Result<()> {
    tracing::info!(build_dir = %build_dir.display(), "compiling v8_monolith");
    Command::for_host(ninja)
        .args(["-v", "-C"])
        .arg(build_dir)
        .arg("v8_monolith")
        .current_dir(source)
        .run()
        .context("ninja failed")
}
