use std::collections::HashMap;

/// Member names of an archive in archive order. Repeated names are distinct
/// members and are all kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    members: Vec<String>,
}

impl Inventory {
    pub fn new(members: Vec<String>) -> Self {
        Self { members }
    }

    /// Parses the output of the archiver's list operation, one member per line.
    pub fn from_listing(listing: &str) -> Self {
        Self {
            members: listing
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.members
    }

    /// Number of occurrences of each name.
    pub fn multiplicity(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for name in self.iter() {
            *counts.entry(name).or_insert(0) += 1;
        }
        counts
    }

    pub fn max_multiplicity(&self) -> usize {
        self.multiplicity().into_values().max().unwrap_or(0)
    }
}

impl<S: Into<String>> FromIterator<S> for Inventory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
