//! Occurrence-indexed extraction groups.
//!
//! Group *k* holds the *k*-th occurrence of every name that occurs at least
//! *k* times, so no group contains a name twice and each one can be
//! extracted into a single directory without overwriting.

use std::collections::{HashMap, HashSet};

use crate::inventory::Inventory;
use crate::mangle::CaseMangling;
use crate::staged::StagedName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    index: usize,
    members: Vec<String>,
}

impl Group {
    fn new(index: usize) -> Self {
        Self {
            index,
            members: Vec::new(),
        }
    }

    /// 1-based; also the occurrence number passed to the archiver.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Splits the group into extraction batches whose on-disk names are
    /// pairwise distinct under `mangling`.
    ///
    /// Without mangling this is the whole group. With it, members that only
    /// differ by case (`Foo.o`, `foo.o`) land in separate batches, since they
    /// would otherwise be written to the same file.
    ///
    /// Splitting only avoids the collision at extraction. The staged names
    /// (`1.Foo.o.o`, `1.foo.o.o`) keep the original case, so they need a
    /// case-sensitive staging directory; on a case-insensitive one the second
    /// rename replaces the first and the staging check rejects the run.
    pub fn batches(&self, mangling: CaseMangling) -> Vec<Vec<&str>> {
        if !mangling.mangles() {
            return vec![self.members.iter().map(String::as_str).collect()];
        }

        let mut batches: Vec<(HashSet<String>, Vec<&str>)> = Vec::new();
        for member in &self.members {
            let on_disk = mangling.on_disk_name(member).into_owned();
            match batches.iter_mut().find(|(taken, _)| !taken.contains(&on_disk)) {
                Some((taken, batch)) => {
                    taken.insert(on_disk);
                    batch.push(member);
                }
                None => batches.push((HashSet::from([on_disk]), vec![member.as_str()])),
            }
        }
        batches.into_iter().map(|(_, batch)| batch).collect()
    }
}

/// Dense, ordered arena of groups built in one pass over an inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionGroups {
    groups: Vec<Group>,
    order: Vec<StagedName>,
}

impl ExtractionGroups {
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();
        let mut order = Vec::with_capacity(inventory.len());

        for name in inventory.iter() {
            let occurrence = seen.entry(name).or_insert(0);
            *occurrence += 1;
            let k = *occurrence;

            while groups.len() < k {
                groups.push(Group::new(groups.len() + 1));
            }
            groups[k - 1].members.push(name.to_owned());
            order.push(StagedName::new(k, name));
        }

        Self { groups, order }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Staged name of every inventory entry, in inventory order.
    pub fn staged_order(&self) -> &[StagedName] {
        &self.order
    }
}

impl<'a> IntoIterator for &'a ExtractionGroups {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
