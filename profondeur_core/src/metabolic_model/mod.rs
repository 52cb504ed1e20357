//! Module providing the Model struct for representing a metabolic model, the immutable store
//! of reactions, metabolites, compartments, and processes that every exploration pass reads.

pub mod compartment;
pub mod metabolite;
pub mod model;
pub mod process;
pub mod reaction;
