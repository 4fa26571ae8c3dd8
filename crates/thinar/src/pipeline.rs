use std::path::PathBuf;

use anyhow::{Context, Result};
use thinar_archive::{ArTool, RepackReport, RepackRequest, Repackager};
use thinar_platform::TargetOs;

use crate::cli::{BuildArgs, RepackArgs};
use crate::config::{Config, Settings};
use crate::gn::{self, GnArgs};
use crate::layout::Layout;
use crate::{deps, patch, toolchain};

/// sync → patch → gen → compile → repack.
pub fn build(settings: &Settings, args: &BuildArgs) -> Result<()> {
    let layout = Layout::new(&settings.deps_dir, settings.target);
    tracing::info!(os_arch = %settings.target, clang = settings.clang, debug = settings.debug, "building");

    if args.skip_sync {
        tracing::info!("skipping source sync");
    } else {
        deps::sync(&layout, settings.target.os)?;
    }

    if TargetOs::host() == Some(TargetOs::Windows) {
        patch::apply_mingw_patches(&layout)?;
    }

    let gn_path = layout.gn();
    anyhow::ensure!(gn_path.exists(), "gn not found at {}", gn_path.display());
    let ninja_path = layout.ninja();
    anyhow::ensure!(ninja_path.exists(), "ninja not found at {}", ninja_path.display());

    let source = layout.source();
    let build_dir = layout.build_dir();
    gn::generate(&gn_path, &source, &build_dir, &GnArgs::from(settings))?;
    gn::compile(&ninja_path, &source, &build_dir)?;

    let ar = settings
        .ar
        .clone()
        .unwrap_or_else(|| toolchain::archiver(&source, settings.target, settings.clang));
    let request = RepackRequest {
        source: layout.monolith(),
        destination: layout.thin_archive(),
        staging: layout.staging(),
    };
    let report = run_repack(ar, settings.target.os, &request)?;
    log_report(&report);
    Ok(())
}

/// Repackage an archive that was built elsewhere.
pub fn repack(config: &Config, args: &RepackArgs) -> Result<()> {
    let os = config.target_os()?;
    let ar = config.ar.clone().unwrap_or_else(|| PathBuf::from("ar"));
    let staging = match &args.staging {
        Some(staging) => staging.clone(),
        None => args
            .destination
            .parent()
            .map(|dir| dir.join("obj"))
            .context("destination has no parent directory")?,
    };

    let request = RepackRequest {
        source: args.source.clone(),
        destination: args.destination.clone(),
        staging,
    };
    let report = run_repack(ar, os, &request)?;
    log_report(&report);
    Ok(())
}

fn run_repack(ar: PathBuf, os: TargetOs, request: &RepackRequest) -> Result<RepackReport> {
    let mangling = toolchain::mangling(os);
    tracing::info!(ar = %ar.display(), ?mangling, "repacking {}", request.source.display());

    Repackager::new(ArTool::new(ar), mangling)
        .run(request)
        .with_context(|| format!("Failed to repack {}", request.source.display()))
}

fn log_report(report: &RepackReport) {
    tracing::info!(
        members = report.members,
        groups = report.groups,
        "thin archive ready at {}",
        report.destination.display()
    );
}
