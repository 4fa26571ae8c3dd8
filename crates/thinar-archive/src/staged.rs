use std::cmp::Ordering;
use std::fmt;

const SUFFIX: &str = ".o";

/// Identity of one staged file: the 1-based extraction group and the
/// original (unmangled) member name.
///
/// Ordering compares the group numerically, so group 10 sorts after group 9.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagedName {
    pub group: usize,
    pub member: String,
}

impl StagedName {
    pub fn new(group: usize, member: impl Into<String>) -> Self {
        Self {
            group,
            member: member.into(),
        }
    }

    /// `{group}.{member}.o`
    pub fn file_name(&self) -> String {
        format!("{}.{}{}", self.group, self.member, SUFFIX)
    }

    /// Inverse of [`StagedName::file_name`].
    pub fn parse(file_name: &str) -> Option<Self> {
        let (group, rest) = file_name.split_once('.')?;
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let member = rest.strip_suffix(SUFFIX)?;
        if member.is_empty() {
            return None;
        }
        Some(Self::new(group.parse().ok()?, member))
    }
}

impl Ord for StagedName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.group
            .cmp(&other.group)
            .then_with(|| self.member.cmp(&other.member))
    }
}

impl PartialOrd for StagedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StagedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}
