use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::mangle::CaseMangling;
use crate::staged::StagedName;

/// Removes `dir` with everything in it and recreates it empty.
pub(crate) fn reset_dir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::precondition(dir)(e)),
    }
    std::fs::create_dir_all(dir).map_err(Error::precondition(dir))
}

pub(crate) fn remove_file_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::precondition(path)(e)),
    }
}

/// Names currently in `dir`, read once per extraction batch.
pub(crate) fn entries(dir: &Path) -> Result<HashSet<OsString>> {
    std::fs::read_dir(dir)
        .map_err(Error::precondition(dir))?
        .map(|entry| entry.map(|e| e.file_name()).map_err(Error::precondition(dir)))
        .collect()
}

/// Moves a freshly extracted member from its on-disk name to its staged name.
///
/// `present` is the staging listing taken after the batch was extracted. A
/// plain rename would also succeed on a case-insensitive file system when
/// only the casing is wrong, so the exact on-disk entry must be listed.
pub(crate) fn rename_extracted(
    staging: &Path,
    present: &HashSet<OsString>,
    staged: &StagedName,
    mangling: CaseMangling,
) -> Result<()> {
    let on_disk = mangling.on_disk_name(&staged.member);
    let from = staging.join(&*on_disk);
    let to = staging.join(staged.file_name());

    if !present.contains(OsStr::new(&*on_disk)) {
        return Err(Error::MissingStaged {
            member: staged.member.clone(),
            group: staged.group,
            path: from,
        });
    }

    std::fs::rename(&from, &to).map_err(|source| Error::Rename { from, to, source })
}

/// Checks that `staging` holds exactly the `expected` staged files.
///
/// Returns the staged names found, in numeric group order.
pub(crate) fn verify(staging: &Path, expected: &[StagedName]) -> Result<Vec<StagedName>> {
    let expected_set: HashSet<&StagedName> = expected.iter().collect();
    let mut found = Vec::with_capacity(expected.len());

    for entry in std::fs::read_dir(staging).map_err(Error::precondition(staging))? {
        let entry = entry.map_err(Error::precondition(staging))?;
        let staged = entry
            .file_name()
            .to_str()
            .and_then(StagedName::parse)
            .filter(|staged| expected_set.contains(staged));
        match staged {
            Some(staged) => found.push(staged),
            None => return Err(Error::UnexpectedStaged { path: entry.path() }),
        }
    }

    if found.len() != expected_set.len() {
        let present: HashSet<&StagedName> = found.iter().collect();
        if let Some(missing) = expected.iter().find(|s| !present.contains(s)) {
            return Err(Error::MissingStaged {
                member: missing.member.clone(),
                group: missing.group,
                path: staging.join(missing.file_name()),
            });
        }
    }

    found.sort();
    Ok(found)
}
