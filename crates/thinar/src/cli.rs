use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Clone, Debug, Parser)]
#[command(name = "thinar", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    #[arg(short, long, global = true, help = "Log every external command")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Configuration file [default: thinar.toml]")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "b", name = "build", about = "Sync, compile and repack the library")]
    Build(BuildArgs),
    #[command(alias = "r", name = "repack", about = "Repack an existing static archive as a thin archive")]
    Repack(RepackArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct TargetArgs {
    #[arg(long, help = "Target OS: android, ios, linux, darwin, windows")]
    pub os: Option<String>,

    #[arg(long, help = "Target CPU: arm64, x86_64")]
    pub arch: Option<String>,

    #[arg(long, help = "Archiver to invoke instead of the toolchain default")]
    pub ar: Option<PathBuf>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long, help = "Directory holding depot_tools, the checkout and the outputs")]
    pub deps_dir: Option<PathBuf>,

    #[arg(long, help = "Debug build with line-level symbols")]
    pub debug: bool,

    #[arg(long, help = "Compile through ccache")]
    pub ccache: bool,

    #[arg(long, overrides_with = "no_clang", help = "Compile with the bundled clang")]
    pub clang: bool,

    #[arg(long, overrides_with = "clang", help = "Compile with the system compiler")]
    pub no_clang: bool,

    #[arg(long, help = "Skip the dependency sync step")]
    pub skip_sync: bool,
}

#[derive(Args, Clone, Debug)]
pub struct RepackArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[arg(long, help = "Fat static archive to read")]
    pub source: PathBuf,

    #[arg(long, help = "Thin archive to write")]
    pub destination: PathBuf,

    #[arg(long, help = "Directory for the member files [default: <destination dir>/obj]")]
    pub staging: Option<PathBuf>,
}

impl BuildArgs {
    fn clang(&self) -> Option<bool> {
        match (self.clang, self.no_clang) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

impl App {
    /// Flags given on the command line, layered over file and environment.
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            verbose: self.verbose.then_some(true),
            ..Overrides::default()
        };

        let target = match &self.cmd {
            Commands::Build(args) => {
                overrides.deps_dir = args.deps_dir.clone();
                overrides.debug = args.debug.then_some(true);
                overrides.ccache = args.ccache.then_some(true);
                overrides.clang = args.clang();
                &args.target
            }
            Commands::Repack(args) => &args.target,
        };
        overrides.os = target.os.clone();
        overrides.arch = target.arch.clone();
        overrides.ar = target.ar.clone();
        overrides
    }
}
