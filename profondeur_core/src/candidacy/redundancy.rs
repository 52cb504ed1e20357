//! Partition of relevant reactions into classes of redundant replicates
//!
//! Two replicates are redundant when their filtered participants are mutually inclusive,
//! keyed by metabolite and role, and also by compartment when compartmentalization is on.
//! Classes are kept in a union-find so that redundancy chains collapse into one class no
//! matter which reaction is examined first.
use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::candidacy::relevance::Participation;
use crate::metabolic_model::reaction::Role;

/// Key of a participant for redundancy comparisons
type ParticipantKey<'a> = (&'a str, Option<&'a str>, Role);

fn participant_keys<P: Participation>(
    participants: &[P],
    compartmentalization: bool,
) -> BTreeSet<ParticipantKey<'_>> {
    participants
        .iter()
        .map(|p| {
            let compartment = if compartmentalization {
                Some(p.compartment())
            } else {
                None
            };
            (p.metabolite(), compartment, p.role())
        })
        .collect()
}

/// Whether two filtered participant lists are mutually inclusive
///
/// Stoichiometric coefficients are not part of the key.
pub fn redundant<P: Participation, Q: Participation>(
    one: &[P],
    two: &[Q],
    compartmentalization: bool,
) -> bool {
    participant_keys(one, compartmentalization) == participant_keys(two, compartmentalization)
}

/// Disjoint sets over reaction identifiers
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Position of each identifier in `parents`
    indices: IndexMap<String, usize>,
    parents: Vec<usize>,
}

impl Partition {
    pub fn new<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut partition = Partition::default();
        for identifier in identifiers {
            if !partition.indices.contains_key(identifier) {
                let index = partition.parents.len();
                partition.indices.insert(identifier.to_string(), index);
                partition.parents.push(index);
            }
        }
        partition
    }

    fn find(&mut self, mut index: usize) -> usize {
        while self.parents[index] != index {
            // Path halving
            self.parents[index] = self.parents[self.parents[index]];
            index = self.parents[index];
        }
        index
    }

    /// Merge the classes of two identifiers, ignoring identifiers outside the partition
    pub fn union(&mut self, one: &str, two: &str) {
        let (Some(&one), Some(&two)) = (self.indices.get(one), self.indices.get(two)) else {
            return;
        };
        let root_one = self.find(one);
        let root_two = self.find(two);
        if root_one != root_two {
            // Deterministic roots keep debugging output stable
            let (low, high) = (root_one.min(root_two), root_one.max(root_two));
            self.parents[high] = low;
        }
    }

    /// Classes of the partition
    ///
    /// Each class is sorted lexicographically, so its first element is the priority
    /// representative, and classes are sorted by that representative.
    pub fn classes(&mut self) -> Vec<Vec<String>> {
        let mut classes: IndexMap<usize, Vec<String>> = IndexMap::new();
        let identifiers: Vec<(String, usize)> = self
            .indices
            .iter()
            .map(|(identifier, index)| (identifier.clone(), *index))
            .collect();
        for (identifier, index) in identifiers {
            let root = self.find(index);
            classes.entry(root).or_default().push(identifier);
        }
        let mut classes: Vec<Vec<String>> = classes
            .into_values()
            .map(|mut class| {
                class.sort();
                class
            })
            .collect();
        classes.sort();
        classes
    }
}

/// Partition relevant reactions into classes of mutually redundant replicates
///
/// # Parameters
/// - `relevant`: filtered participants of every relevant reaction, keyed by reaction id
/// - `replicates`: declared replicates, keyed by reaction id
/// - `compartmentalization`: whether compartments distinguish participants
pub fn partition_redundant<P: Participation>(
    relevant: &IndexMap<String, Vec<P>>,
    replicates: &IndexMap<String, Vec<String>>,
    compartmentalization: bool,
) -> Vec<Vec<String>> {
    let mut partition = Partition::new(relevant.keys().map(String::as_str));
    for (identifier, participants) in relevant {
        let Some(declared) = replicates.get(identifier) else {
            continue;
        };
        for replicate in declared {
            if replicate == identifier {
                continue;
            }
            let Some(others) = relevant.get(replicate) else {
                continue;
            };
            if redundant(participants, others, compartmentalization) {
                log::debug!("Reaction {} is redundant with {}", identifier, replicate);
                partition.union(identifier, replicate);
            }
        }
    }
    partition.classes()
}

#[cfg(test)]
mod redundancy_tests {
    use super::*;
    use crate::metabolic_model::reaction::Participant;

    #[test]
    fn keys_ignore_coefficients() {
        let one = vec![Participant::reactant("a", "c"), Participant::new("b", "c", Role::Product, 2.0)];
        let two = vec![Participant::new("b", "c", Role::Product, 1.0), Participant::reactant("a", "c")];
        assert!(redundant(&one, &two, true));
    }

    #[test]
    fn keys_with_compartments() {
        let one = vec![Participant::reactant("a", "c"), Participant::product("b", "c")];
        let two = vec![Participant::reactant("a", "m"), Participant::product("b", "m")];
        assert!(redundant(&one, &two, false));
        assert!(!redundant(&one, &two, true));
    }

    #[test]
    fn subset_is_not_redundant() {
        let one = vec![Participant::reactant("a", "c"), Participant::product("b", "c")];
        let two = vec![
            Participant::reactant("a", "c"),
            Participant::product("b", "c"),
            Participant::product("h", "c"),
        ];
        assert!(!redundant(&one, &two, false));
    }

    #[test]
    fn partition_classes() {
        let mut partition = Partition::new(["R3", "R1", "R2", "R4"]);
        partition.union("R3", "R2");
        partition.union("R2", "R1");
        partition.union("R4", "missing");
        assert_eq!(
            partition.classes(),
            vec![
                vec!["R1".to_string(), "R2".to_string(), "R3".to_string()],
                vec!["R4".to_string()],
            ]
        );
    }

    #[test]
    fn redundant_replicates() {
        let mut relevant: IndexMap<String, Vec<Participant>> = IndexMap::new();
        relevant.insert(
            "R2".to_string(),
            vec![Participant::reactant("a", "m"), Participant::product("b", "m")],
        );
        relevant.insert(
            "R1".to_string(),
            vec![Participant::reactant("a", "c"), Participant::product("b", "c")],
        );
        relevant.insert(
            "R3".to_string(),
            vec![Participant::reactant("a", "c"), Participant::product("b", "c")],
        );
        let replicates: IndexMap<String, Vec<String>> = [
            ("R1".to_string(), vec!["R2".to_string(), "R3".to_string()]),
            ("R2".to_string(), vec!["R1".to_string()]),
            ("R3".to_string(), vec![]),
        ]
        .into_iter()
        .collect();
        let classes = partition_redundant(&relevant, &replicates, false);
        assert_eq!(classes, vec![vec!["R1".to_string(), "R2".to_string(), "R3".to_string()]]);

        let classes = partition_redundant(&relevant, &replicates, true);
        assert_eq!(
            classes,
            vec![
                vec!["R1".to_string(), "R3".to_string()],
                vec!["R2".to_string()],
            ]
        );
    }
}
