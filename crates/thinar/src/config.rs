use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thinar_platform::{Arch, Target, TargetOs};

use crate::toolchain;

const DEFAULT_FILE: &str = "thinar.toml";
const ENV_PREFIX: &str = "THINAR_";

/// Layered settings: defaults, then `thinar.toml`, then `THINAR_*`
/// variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub deps_dir: PathBuf,
    pub os: Option<String>,
    pub arch: Option<String>,
    pub clang: Option<bool>,
    pub debug: bool,
    pub ccache: bool,
    pub verbose: bool,
    pub ar: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deps_dir: PathBuf::from("deps"),
            os: None,
            arch: None,
            clang: None,
            debug: false,
            ccache: false,
            verbose: false,
            ar: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deps_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clang: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ar: Option<PathBuf>,
}

/// Fully resolved settings for a build.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub deps_dir: PathBuf,
    pub target: Target,
    pub clang: bool,
    pub debug: bool,
    pub ccache: bool,
    pub ar: Option<PathBuf>,
}

impl Config {
    pub fn figment(file: Option<&Path>, overrides: Overrides) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file.unwrap_or(Path::new(DEFAULT_FILE))))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        if let Some(file) = file {
            anyhow::ensure!(file.is_file(), "config file {} does not exist", file.display());
        }
        Self::figment(file, overrides)
            .extract()
            .context("Failed to load configuration")
    }

    pub fn target_os(&self) -> Result<TargetOs> {
        match &self.os {
            Some(os) => Ok(os.parse()?),
            None => TargetOs::host().context("Failed to detect host OS, pass --os"),
        }
    }

    pub fn target_arch(&self) -> Result<Arch> {
        match &self.arch {
            Some(arch) => Ok(arch.parse()?),
            None => Arch::host().context("Host CPU is not arm64 or x86_64, pass --arch"),
        }
    }

    pub fn resolve(&self) -> Result<Settings> {
        let target = Target::new(self.target_os()?, self.target_arch()?);
        Ok(Settings {
            deps_dir: self.deps_dir.clone(),
            target,
            clang: self
                .clang
                .unwrap_or_else(|| toolchain::default_clang(target.os)),
            debug: self.debug,
            ccache: self.ccache,
            ar: self.ar.clone(),
        })
    }
}
