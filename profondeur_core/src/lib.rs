//! Core rust implementation of Profondeur, a crate for exploring the networks of metabolic
//! models.
//!
//! A [`Model`](metabolic_model::model::Model) is read once, then each exploration filters it
//! to the compartments and processes of interest, resolves a candidate network without
//! redundant replicate reactions, and builds a network of nodes and links. Traversals over
//! that network grow or shrink a subnetwork.

pub mod candidacy;
pub mod configuration;
pub mod exploration;
pub mod filter;
pub mod io;
pub mod metabolic_model;
pub mod network;
pub mod subnetwork;
pub mod traversal;
mod utils;
