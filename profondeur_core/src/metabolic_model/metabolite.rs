//! This module provides the metabolite struct representing a metabolite

use std::hash::Hash;

use derive_builder::Builder;

/// Represents a general metabolite, independent of the compartment it occupies
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Compartments the metabolite can occupy
    ///
    /// ### Note
    /// When a model document doesn't list these, they are collected from the
    /// reaction participants that reference the metabolite.
    #[builder(default = "Vec::new()")]
    pub compartments: Vec<String>,
}

impl Metabolite {
    /// Create a metabolite with only an identifier
    pub fn new_id_only(id: &str) -> Metabolite {
        Metabolite {
            id: id.to_string(),
            name: None,
            formula: None,
            charge: 0,
            compartments: Vec::new(),
        }
    }

    /// Record that the metabolite occupies a compartment
    pub(crate) fn include_compartment(&mut self, compartment: &str) {
        if !self.compartments.iter().any(|c| c == compartment) {
            self.compartments.push(compartment.to_string());
        }
    }
}

impl Hash for Metabolite {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state); // Hash only depends on id
    }
}
