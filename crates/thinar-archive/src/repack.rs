use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::archiver::Archiver;
use crate::error::{Error, Result};
use crate::group::ExtractionGroups;
use crate::mangle::CaseMangling;
use crate::path::relative_path;
use crate::staged::StagedName;
use crate::staging;

/// Where one run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackRequest {
    /// The fat archive.
    pub source: PathBuf,
    /// The thin archive to (re)create.
    pub destination: PathBuf,
    /// Directory for the uniquely named members. Wiped at the start of a run.
    pub staging: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackReport {
    pub members: usize,
    pub groups: usize,
    /// Staged member files, in source archive order.
    pub staged: Vec<PathBuf>,
    pub destination: PathBuf,
}

/// Progress of a run. `Failed` is terminal; nothing is unwound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Inventoried,
    Grouped,
    Extracting(usize),
    Renaming(usize),
    Assembling,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Start => f.write_str("start"),
            Phase::Inventoried => f.write_str("inventoried"),
            Phase::Grouped => f.write_str("grouped"),
            Phase::Extracting(group) => write!(f, "extracting group {group}"),
            Phase::Renaming(group) => write!(f, "renaming group {group}"),
            Phase::Assembling => f.write_str("assembling"),
            Phase::Done => f.write_str("done"),
            Phase::Failed => f.write_str("failed"),
        }
    }
}

pub struct Repackager<A> {
    archiver: A,
    mangling: CaseMangling,
    on_phase: Option<Arc<dyn Fn(Phase) + Send + Sync>>,
}

impl<A: Archiver> Repackager<A> {
    pub fn new(archiver: A, mangling: CaseMangling) -> Self {
        Self {
            archiver,
            mangling,
            on_phase: None,
        }
    }

    pub fn on_phase(mut self, callback: Arc<dyn Fn(Phase) + Send + Sync>) -> Self {
        self.on_phase = Some(callback);
        self
    }

    pub fn archiver(&self) -> &A {
        &self.archiver
    }

    /// Rebuilds `request.destination` as a thin archive over uniquely named
    /// copies of every member of `request.source`.
    ///
    /// The run owns the staging directory and the destination for its whole
    /// duration. Two concurrent runs sharing either path are unsafe.
    ///
    /// A failed `list` touches nothing. Any later failure leaves no
    /// destination, or a partial one if assembly itself failed, since the
    /// previous destination is removed before the staging directory it
    /// points into is wiped.
    pub fn run(&self, request: &RepackRequest) -> Result<RepackReport> {
        let result = self.execute(request);
        if let Err(e) = &result {
            tracing::error!(source = %request.source.display(), error = %e, "repackaging failed");
            self.enter(Phase::Failed);
        }
        result
    }

    fn enter(&self, phase: Phase) {
        tracing::debug!(%phase, "repack phase");
        if let Some(callback) = &self.on_phase {
            callback(phase);
        }
    }

    fn execute(&self, request: &RepackRequest) -> Result<RepackReport> {
        self.enter(Phase::Start);
        let source = absolute(&request.source)?;
        let destination = absolute(&request.destination)?;
        let staging_dir = absolute(&request.staging)?;

        let inventory = self.archiver.list(&source)?;
        self.enter(Phase::Inventoried);
        tracing::info!(
            source = %source.display(),
            members = inventory.len(),
            max_multiplicity = inventory.max_multiplicity(),
            "listed archive"
        );

        let groups = ExtractionGroups::from_inventory(&inventory);
        self.enter(Phase::Grouped);

        // The previous destination references files in staging.
        staging::remove_file_if_exists(&destination)?;
        staging::reset_dir(&staging_dir)?;
        for group in &groups {
            for batch in group.batches(self.mangling) {
                self.enter(Phase::Extracting(group.index()));
                self.archiver
                    .extract_batch(&source, &staging_dir, group.index(), &batch)?;

                self.enter(Phase::Renaming(group.index()));
                let present = staging::entries(&staging_dir)?;
                for member in batch {
                    let staged = StagedName::new(group.index(), member);
                    staging::rename_extracted(&staging_dir, &present, &staged, self.mangling)?;
                }
            }
        }
        staging::verify(&staging_dir, groups.staged_order())?;

        self.enter(Phase::Assembling);
        let staged: Vec<PathBuf> = groups
            .staged_order()
            .iter()
            .map(|s| staging_dir.join(s.file_name()))
            .collect();
        self.assemble(&destination, &staged)?;

        self.enter(Phase::Done);
        tracing::info!(
            destination = %destination.display(),
            members = staged.len(),
            groups = groups.len(),
            "wrote thin archive"
        );

        Ok(RepackReport {
            members: inventory.len(),
            groups: groups.len(),
            staged,
            destination,
        })
    }

    fn assemble(&self, destination: &Path, staged: &[PathBuf]) -> Result<()> {
        let (Some(dest_dir), Some(archive_name)) = (destination.parent(), destination.file_name())
        else {
            return Err(Error::Precondition {
                path: destination.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "destination is not a file path"),
            });
        };

        std::fs::create_dir_all(dest_dir).map_err(Error::precondition(dest_dir))?;

        let members = staged
            .iter()
            .map(|path| relative_path(path, dest_dir))
            .collect::<Result<Vec<_>>>()?;

        self.archiver
            .create_thin(dest_dir, Path::new(archive_name), &members)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(Error::precondition(path))
}
