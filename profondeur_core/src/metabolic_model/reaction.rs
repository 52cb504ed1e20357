//! This module provides a struct for representing reactions, their participants, and the
//! operation (conversion or transport) that they perform
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::utils::sets::{collect_unique, mutually_inclusive};

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Metabolites that participate in the reaction, each in a compartment and role
    #[builder(default = "Vec::new()")]
    pub participants: Vec<Participant>,
    /// Identifiers of the processes the reaction belongs to
    #[builder(default = "Vec::new()")]
    pub processes: Vec<String>,
    /// Whether the reaction can proceed in both directions
    #[builder(default = "false")]
    pub reversibility: bool,
    /// What the reaction does with its participants
    ///
    /// ### Note
    /// If not set explicitly this is derived from the participants (see [`derive_operation`]).
    #[builder(default = "self.derived_operation()")]
    pub operation: Operation,
    /// Identifiers of other reactions that are chemically identical to this one
    #[builder(default = "Vec::new()")]
    pub replicates: Vec<String>,
}

impl ReactionBuilder {
    fn derived_operation(&self) -> Operation {
        derive_operation(self.participants.as_deref().unwrap_or_default())
    }
}

impl Reaction {
    /// Unique metabolite identifiers that participate in a role, in order of appearance
    pub fn metabolites_by_role(&self, role: Role) -> Vec<&str> {
        participants_metabolites(&self.participants, role)
    }

    /// Transports that the reaction performs, empty if it performs none
    pub fn transports(&self) -> &[Transport] {
        self.operation.transports()
    }
}

/// Role of a metabolite in a reaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Consumed by the reaction
    Reactant,
    /// Produced by the reaction
    Product,
}

/// A metabolite, in a compartment, participating in a reaction
#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    /// Identifier of the general metabolite
    pub metabolite: String,
    /// Identifier of the compartment in which the metabolite participates
    pub compartment: String,
    /// Whether the metabolite is a reactant or a product
    pub role: Role,
    /// Stoichiometric coefficient
    pub coefficient: f64,
}

impl Participant {
    pub fn new(metabolite: &str, compartment: &str, role: Role, coefficient: f64) -> Self {
        Participant {
            metabolite: metabolite.to_string(),
            compartment: compartment.to_string(),
            role,
            coefficient,
        }
    }

    /// Create a reactant with a coefficient of one
    pub fn reactant(metabolite: &str, compartment: &str) -> Self {
        Self::new(metabolite, compartment, Role::Reactant, 1.0)
    }

    /// Create a product with a coefficient of one
    pub fn product(metabolite: &str, compartment: &str) -> Self {
        Self::new(metabolite, compartment, Role::Product, 1.0)
    }
}

/// Movement of a metabolite between compartments
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transport {
    /// Identifier of the general metabolite that moves
    pub metabolite: String,
    /// Compartments between which the metabolite moves
    pub compartments: Vec<String>,
}

/// What a reaction does with its participants
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Chemical conversion of reactants to products, possibly also moving some metabolites
    Conversion { transports: Vec<Transport> },
    /// Only movement of metabolites between compartments
    Transport { transports: Vec<Transport> },
    /// Neither conversion nor transport (for example a metabolite to itself)
    Inert,
}

impl Operation {
    /// Build an operation from the separate flags of a model document
    pub fn from_flags(conversion: bool, transport: bool, transports: Vec<Transport>) -> Self {
        match (conversion, transport) {
            (true, _) => Operation::Conversion { transports },
            (false, true) => Operation::Transport { transports },
            (false, false) => Operation::Inert,
        }
    }

    pub fn transports(&self) -> &[Transport] {
        match self {
            Operation::Conversion { transports } | Operation::Transport { transports } => {
                transports
            }
            Operation::Inert => &[],
        }
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, Operation::Conversion { .. })
    }
}

/// Unique metabolite identifiers that participate in a role
fn participants_metabolites(participants: &[Participant], role: Role) -> Vec<&str> {
    collect_unique(
        participants
            .iter()
            .filter(|p| p.role == role)
            .map(|p| p.metabolite.as_str()),
    )
}

/// Unique compartments in which a metabolite participates in a role
fn participant_compartments<'a>(
    participants: &'a [Participant],
    metabolite: &str,
    role: Role,
) -> Vec<&'a str> {
    collect_unique(
        participants
            .iter()
            .filter(|p| p.role == role && p.metabolite == metabolite)
            .map(|p| p.compartment.as_str()),
    )
}

/// Determine whether participants describe a chemical conversion
///
/// A conversion occurs unless the reactant and product metabolites are mutually inclusive.
pub fn derive_conversion(participants: &[Participant]) -> bool {
    let reactants = participants_metabolites(participants, Role::Reactant);
    let products = participants_metabolites(participants, Role::Product);
    !mutually_inclusive(reactants.iter().copied(), products.iter().copied())
}

/// Collect the metabolites that participants move between compartments
///
/// A metabolite moves when it is both a reactant and a product and its compartments
/// in the two roles are not mutually inclusive.
pub fn derive_transports(participants: &[Participant]) -> Vec<Transport> {
    let reactants = participants_metabolites(participants, Role::Reactant);
    let products = participants_metabolites(participants, Role::Product);
    products
        .iter()
        .filter(|m| reactants.contains(m))
        .filter_map(|metabolite| {
            let from = participant_compartments(participants, metabolite, Role::Reactant);
            let to = participant_compartments(participants, metabolite, Role::Product);
            if mutually_inclusive(from.iter().copied(), to.iter().copied()) {
                return None;
            }
            let compartments = collect_unique(from.into_iter().chain(to))
                .into_iter()
                .map(String::from)
                .collect();
            Some(Transport {
                metabolite: metabolite.to_string(),
                compartments,
            })
        })
        .collect()
}

/// Derive the operation of a reaction from its participants
pub fn derive_operation(participants: &[Participant]) -> Operation {
    let conversion = derive_conversion(participants);
    let transports = derive_transports(participants);
    let transport = !transports.is_empty();
    Operation::from_flags(conversion, transport, transports)
}
