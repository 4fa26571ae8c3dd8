//! The three archiver operations the repackager relies on.

use std::fmt;
use std::path::{Path, PathBuf};

use thinar_platform::Command;

use crate::error::{Error, Result};
use crate::inventory::Inventory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Extract,
    CreateThin,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::List => "list",
            Operation::Extract => "extract",
            Operation::CreateThin => "create-thin",
        })
    }
}

/// Byte-level archive access. Every call blocks until the tool exits.
pub trait Archiver {
    /// Member names of `archive`, in archive order.
    fn list(&self, archive: &Path) -> Result<Inventory>;

    /// Writes the `occurrence`-th (1-based) member called each of `names`
    /// into `out_dir`. `names` must not repeat.
    fn extract_batch(
        &self,
        archive: &Path,
        out_dir: &Path,
        occurrence: usize,
        names: &[&str],
    ) -> Result<()>;

    /// Creates the thin archive `archive` referencing `members`, in order.
    /// Both are resolved against `working_dir`, and `members` are stored
    /// as given.
    fn create_thin(&self, working_dir: &Path, archive: &Path, members: &[PathBuf]) -> Result<()>;
}

/// `ar`-compatible command-line archiver (GNU `ar`, `llvm-ar`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArTool {
    program: PathBuf,
}

impl ArTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
    }

    fn list_command(&self, archive: &Path) -> Command {
        self.command().arg("t").arg(archive)
    }

    fn extract_command(
        &self,
        archive: &Path,
        out_dir: &Path,
        occurrence: usize,
        names: &[&str],
    ) -> Command {
        self.command()
            .arg("xN")
            .arg("--output")
            .arg(out_dir)
            .arg(occurrence.to_string())
            .arg(archive)
            .args(names)
    }

    fn create_thin_command(&self, working_dir: &Path, archive: &Path, members: &[PathBuf]) -> Command {
        self.command()
            .args(["qsc", "--thin"])
            .arg(archive)
            .args(members)
            .current_dir(working_dir)
    }
}

fn external(operation: Operation) -> impl FnOnce(thinar_platform::Error) -> Error {
    move |source| Error::ExternalTool { operation, source }
}

impl Archiver for ArTool {
    fn list(&self, archive: &Path) -> Result<Inventory> {
        let listing = self
            .list_command(archive)
            .stdout_text()
            .map_err(external(Operation::List))?;
        Ok(Inventory::from_listing(&listing))
    }

    fn extract_batch(
        &self,
        archive: &Path,
        out_dir: &Path,
        occurrence: usize,
        names: &[&str],
    ) -> Result<()> {
        self.extract_command(archive, out_dir, occurrence, names)
            .checked_output()
            .map(drop)
            .map_err(external(Operation::Extract))
    }

    fn create_thin(&self, working_dir: &Path, archive: &Path, members: &[PathBuf]) -> Result<()> {
        self.create_thin_command(working_dir, archive, members)
            .checked_output()
            .map(drop)
            .map_err(external(Operation::CreateThin))
    }
}
