mod common;

use std::collections::{HashMap, HashSet};

use common::{FakeArchiver, thin_bodies};
use proptest::prelude::*;
use thinar_archive::{CaseMangling, ExtractionGroups, Inventory, RepackRequest, Repackager};

fn inventory_strategy() -> impl Strategy<Value = Vec<String>> {
    // A small alphabet forces plenty of repeats.
    prop::collection::vec("[a-dA-D]{1,2}\\.o", 0..40)
}

fn counts<'a>(names: impl IntoIterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #[test]
    fn groups_partition_the_inventory(names in inventory_strategy()) {
        let inventory = Inventory::new(names.clone());
        let groups = ExtractionGroups::from_inventory(&inventory);

        let grouped = groups.iter().flat_map(|g| g.members().iter().map(String::as_str));
        prop_assert_eq!(counts(grouped), counts(names.iter().map(String::as_str)));
    }

    #[test]
    fn groups_are_collision_free(names in inventory_strategy()) {
        let groups = ExtractionGroups::from_inventory(&Inventory::new(names));
        for group in &groups {
            let unique: HashSet<&String> = group.members().iter().collect();
            prop_assert_eq!(unique.len(), group.members().len());
        }
    }

    #[test]
    fn group_count_is_max_multiplicity(names in inventory_strategy()) {
        let inventory = Inventory::new(names);
        let groups = ExtractionGroups::from_inventory(&inventory);
        prop_assert_eq!(groups.len(), inventory.max_multiplicity());
    }

    #[test]
    fn group_k_only_holds_names_seen_k_times(names in inventory_strategy()) {
        let inventory = Inventory::new(names);
        let multiplicity = inventory.multiplicity();
        let groups = ExtractionGroups::from_inventory(&inventory);
        for group in &groups {
            for member in group.members() {
                prop_assert!(multiplicity[member.as_str()] >= group.index());
            }
        }
    }

    #[test]
    fn staged_order_follows_inventory(names in inventory_strategy()) {
        let inventory = Inventory::new(names.clone());
        let groups = ExtractionGroups::from_inventory(&inventory);
        let members: Vec<&str> = groups.staged_order().iter().map(|s| s.member.as_str()).collect();
        prop_assert_eq!(members, names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn thin_archive_round_trips_member_order(names in inventory_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("fat.a");
        let bodies: Vec<String> = (0..names.len()).map(|i| format!("member #{i}")).collect();
        let members: Vec<(&str, &str)> = names
            .iter()
            .zip(&bodies)
            .map(|(n, b)| (n.as_str(), b.as_str()))
            .collect();
        let fake = FakeArchiver::with_archive(&source, &members);
        let request = RepackRequest {
            source,
            destination: dir.path().join("out/lib.a"),
            staging: dir.path().join("out/obj"),
        };

        Repackager::new(fake, CaseMangling::Preserve).run(&request).unwrap();

        prop_assert_eq!(thin_bodies(&request.destination), bodies);
    }
}
