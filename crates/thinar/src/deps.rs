//! Source checkout through `gclient`.

use anyhow::{Context, Result};
use thinar_platform::Command;
use thinar_platform::TargetOs;
use thinar_platform::env::PathModifier;

use crate::layout::Layout;

const SOLUTION_NAME: &str = "v8";
const SOLUTION_URL: &str = "https://chromium.googlesource.com/v8/v8.git";

/// Dependencies the library build never needs.
const SKIPPED_DEPS: [&str; 5] = [
    "v8/testing/gmock",
    "v8/test/wasm-js",
    "v8/third_party/colorama/src",
    "v8/tools/gyp",
    "v8/tools/luci-go",
];

/// Only needed when targeting Android.
const ANDROID_ONLY_DEPS: [&str; 2] = ["v8/third_party/catapult", "v8/third_party/android_tools"];

pub fn skipped_deps(os: TargetOs) -> Vec<&'static str> {
    let mut deps = SKIPPED_DEPS.to_vec();
    if os != TargetOs::Android {
        deps.extend(ANDROID_ONLY_DEPS);
    }
    deps
}

/// The `.gclient`-style spec passed to `gclient sync --spec`.
pub fn solution_spec(os: TargetOs) -> String {
    let custom_deps = skipped_deps(os)
        .iter()
        .map(|dep| format!("'{dep}': None"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "solutions = [{{'name': '{SOLUTION_NAME}', 'url': '{SOLUTION_URL}', 'deps_file': 'DEPS', \
         'managed': False, 'custom_deps': {{{custom_deps}}}, \
         'custom_vars': {{'build_for_node': True}}}}]\n\
         target_os = ['{}']",
        os.gn_name()
    )
}

pub fn sync(layout: &Layout, os: TargetOs) -> Result<()> {
    let path = PathModifier::new().prepend(layout.depot_tools()).build()?;
    tracing::info!(deps = %layout.deps().display(), "syncing sources");

    Command::for_host("gclient")
        .args(["sync", "--spec"])
        .arg(solution_spec(os))
        .env("PATH", path)
        .current_dir(layout.deps())
        .run()
        .context("gclient sync failed")
}
