//! On-disk casing of extracted members.
//!
//! Some archivers write an extracted member under a case-folded file name
//! while the archive index keeps the original. Which one applies is a fixed
//! fact about the target toolchain and is never probed at runtime.

use std::borrow::Cow;

use thinar_platform::TargetOs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMangling {
    /// The file is written under the exact member name.
    #[default]
    Preserve,
    Lowercase,
    Uppercase,
}

impl CaseMangling {
    /// The bundled `llvm-ar` lowercases names on extraction when targeting
    /// Darwin; every other supported target keeps them.
    ///
    /// Members whose names differ only by case are extracted in separate
    /// batches (see [`Group::batches`](crate::Group::batches)), but their
    /// staged names still differ only by case. On a case-insensitive file
    /// system, the macOS default, such an archive cannot be staged and the
    /// run fails with a consistency error.
    pub fn for_target(os: TargetOs) -> Self {
        match os {
            TargetOs::Darwin => Self::Lowercase,
            TargetOs::Android | TargetOs::Ios | TargetOs::Linux | TargetOs::Windows => {
                Self::Preserve
            }
        }
    }

    pub fn mangles(self) -> bool {
        self != Self::Preserve
    }

    /// File name the archiver produces for `member`.
    pub fn on_disk_name(self, member: &str) -> Cow<'_, str> {
        match self {
            Self::Preserve => Cow::Borrowed(member),
            Self::Lowercase => Cow::Owned(member.to_lowercase()),
            Self::Uppercase => Cow::Owned(member.to_uppercase()),
        }
    }
}
