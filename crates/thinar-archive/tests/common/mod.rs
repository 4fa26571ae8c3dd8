#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thinar_archive::{Archiver, CaseMangling, Error, Inventory, Operation, Result};

/// In-memory stand-in for `ar`.
///
/// Archives live in memory keyed by path. Extraction writes real files and
/// create-thin writes a text index, one member path per line, appending like
/// `ar q` does when the archive already exists.
#[derive(Default)]
pub struct FakeArchiver {
    archives: HashMap<PathBuf, Vec<(String, Vec<u8>)>>,
    pub writes_as: CaseMangling,
    pub fail_extract_at: Option<usize>,
    pub fail_list: bool,
    pub skip_member: Option<String>,
    pub extract_calls: Cell<usize>,
    pub created: RefCell<Vec<PathBuf>>,
}

pub const THIN_MAGIC: &str = "!<thin>";

impl FakeArchiver {
    pub fn with_archive(path: &Path, members: &[(&str, &str)]) -> Self {
        let mut fake = Self::default();
        fake.archives.insert(
            path.to_path_buf(),
            members
                .iter()
                .map(|(name, body)| (name.to_string(), body.as_bytes().to_vec()))
                .collect(),
        );
        fake
    }

    fn failure(operation: Operation, cmd: &str) -> Error {
        Error::ExternalTool {
            operation,
            source: thinar_platform::Error::Status {
                cmd: cmd.to_string(),
                code: Some(1),
                stderr: "fake failure".to_string(),
            },
        }
    }
}

impl Archiver for FakeArchiver {
    fn list(&self, archive: &Path) -> Result<Inventory> {
        if self.fail_list {
            return Err(Self::failure(Operation::List, "ar t"));
        }
        let members = self
            .archives
            .get(archive)
            .ok_or_else(|| Self::failure(Operation::List, "ar t"))?;
        Ok(members.iter().map(|(name, _)| name.as_str()).collect())
    }

    fn extract_batch(
        &self,
        archive: &Path,
        out_dir: &Path,
        occurrence: usize,
        names: &[&str],
    ) -> Result<()> {
        self.extract_calls.set(self.extract_calls.get() + 1);
        if self.fail_extract_at == Some(occurrence) {
            return Err(Self::failure(Operation::Extract, "ar xN"));
        }
        let members = self
            .archives
            .get(archive)
            .ok_or_else(|| Self::failure(Operation::Extract, "ar xN"))?;

        for name in names {
            if self.skip_member.as_deref() == Some(*name) {
                continue;
            }
            let (_, body) = members
                .iter()
                .filter(|(member, _)| member == name)
                .nth(occurrence - 1)
                .ok_or_else(|| Self::failure(Operation::Extract, "ar xN"))?;
            let on_disk = self.writes_as.on_disk_name(name);
            std::fs::write(out_dir.join(&*on_disk), body).expect("write extracted member");
        }
        Ok(())
    }

    fn create_thin(&self, working_dir: &Path, archive: &Path, members: &[PathBuf]) -> Result<()> {
        let path = working_dir.join(archive);
        let mut index = std::fs::read_to_string(&path).unwrap_or_else(|_| format!("{THIN_MAGIC}\n"));
        for member in members {
            assert!(member.is_relative(), "thin member {} is not relative", member.display());
            assert!(working_dir.join(member).is_file(), "thin member {} is missing", member.display());
            index.push_str(&member.to_string_lossy());
            index.push('\n');
        }
        std::fs::write(&path, index).expect("write thin archive");
        self.created.borrow_mut().push(path);
        Ok(())
    }
}

/// Member paths stored in a fake thin archive.
pub fn thin_members(archive: &Path) -> Vec<PathBuf> {
    let index = std::fs::read_to_string(archive).expect("read thin archive");
    let mut lines = index.lines();
    assert_eq!(lines.next(), Some(THIN_MAGIC));
    lines.map(PathBuf::from).collect()
}

/// Bodies of the members a fake thin archive references, in order.
pub fn thin_bodies(archive: &Path) -> Vec<String> {
    let dir = archive.parent().expect("archive has a parent");
    thin_members(archive)
        .iter()
        .map(|member| std::fs::read_to_string(dir.join(member)).expect("read member"))
        .collect()
}

pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}
