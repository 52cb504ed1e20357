//! Traversal queries over a network or a subnetwork
//!
//! Each query searches a [`SourceGraph`] and returns the nodes and links it finds, which the
//! caller then combines into a subnetwork. Parameters are validated against the configured
//! bounds, and every referenced node must be in the source graph, before any search runs.
pub mod connection;
pub mod graph;
pub mod path;
pub mod proximity;
pub mod rogue;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::{self, Configuration};
use crate::subnetwork::Combination;
use crate::traversal::connection::connection;
pub use crate::traversal::graph::{Direction, PathDirection, SourceGraph};
use crate::traversal::path::{path, GraphPath};
use crate::traversal::proximity::proximity;
use crate::traversal::rogue::rogue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraversalError {
    #[error("Node {0} is not in the graph being searched")]
    NotFound(String),
    #[error("Invalid traversal parameter: {0}")]
    InvalidParameter(String),
}

/// Nodes and links a traversal found, in order of discovery
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalResult {
    pub nodes: IndexSet<String>,
    pub links: IndexSet<String>,
}

impl TraversalResult {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub(crate) fn include_node(&mut self, node: &str) {
        if !self.nodes.contains(node) {
            self.nodes.insert(node.to_string());
        }
    }

    pub(crate) fn include_link(&mut self, link: &str) {
        if !self.links.contains(link) {
            self.links.insert(link.to_string());
        }
    }

    pub(crate) fn include_path(&mut self, path: &GraphPath) {
        for node in &path.nodes {
            self.include_node(node);
        }
        for link in &path.links {
            self.include_link(link);
        }
    }
}

fn default_depth() -> usize {
    configuration::current().default_depth
}

fn default_count() -> usize {
    configuration::current().default_count
}

/// A traversal and its parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Query {
    /// The focus node alone, to toggle its membership
    Rogue { focus: String },
    Proximity {
        focus: String,
        #[serde(default)]
        direction: Direction,
        #[serde(default = "default_depth")]
        depth: usize,
    },
    Path {
        source: String,
        target: String,
        #[serde(default)]
        direction: PathDirection,
        #[serde(default = "default_count")]
        count: usize,
    },
    Connection {
        targets: Vec<String>,
        #[serde(default = "default_count")]
        count: usize,
    },
}

/// A query and how its result combines with the current subnetwork
///
/// # Examples
/// ```rust
/// use profondeur_core::traversal::{Query, TraversalRequest};
/// use profondeur_core::subnetwork::Combination;
/// let request: TraversalRequest =
///     serde_json::from_str(r#"{"type": "rogue", "combination": "difference", "focus": "B"}"#)
///         .unwrap();
/// assert_eq!(request.combination, Combination::Difference);
/// assert_eq!(request.query, Query::Rogue { focus: "B".to_string() });
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraversalRequest {
    #[serde(flatten)]
    pub query: Query,
    #[serde(default)]
    pub combination: Combination,
}

impl TraversalRequest {
    pub fn new(query: Query, combination: Combination) -> Self {
        TraversalRequest { query, combination }
    }
}

fn require_node(graph: &SourceGraph, node: &str) -> Result<(), TraversalError> {
    if graph.contains(node) {
        Ok(())
    } else {
        Err(TraversalError::NotFound(node.to_string()))
    }
}

fn require_count(configuration: &Configuration, count: usize) -> Result<(), TraversalError> {
    if configuration.admits_count(count) {
        Ok(())
    } else {
        Err(TraversalError::InvalidParameter(format!(
            "count {} is outside [{}, {}]",
            count, configuration.minimum_count, configuration.maximum_count
        )))
    }
}

impl Query {
    /// Check parameters and referenced nodes without searching
    pub fn validate(&self, graph: &SourceGraph) -> Result<(), TraversalError> {
        let configuration = configuration::current();
        match self {
            Query::Rogue { focus } => require_node(graph, focus),
            Query::Proximity { focus, depth, .. } => {
                if !configuration.admits_depth(*depth) {
                    return Err(TraversalError::InvalidParameter(format!(
                        "depth {} is outside [{}, {}]",
                        depth, configuration.minimum_depth, configuration.maximum_depth
                    )));
                }
                require_node(graph, focus)
            }
            Query::Path {
                source,
                target,
                count,
                ..
            } => {
                require_count(&configuration, *count)?;
                require_node(graph, source)?;
                require_node(graph, target)
            }
            Query::Connection { targets, count } => {
                require_count(&configuration, *count)?;
                let distinct: IndexSet<&String> = targets.iter().collect();
                if distinct.len() < 2 {
                    return Err(TraversalError::InvalidParameter(format!(
                        "connection needs at least two distinct targets, got {}",
                        distinct.len()
                    )));
                }
                distinct
                    .into_iter()
                    .try_for_each(|target| require_node(graph, target))
            }
        }
    }
}

/// Run a query over a source graph
pub fn traverse(graph: &SourceGraph, query: &Query) -> Result<TraversalResult, TraversalError> {
    query.validate(graph)?;
    let result = match query {
        Query::Rogue { focus } => rogue(graph, focus),
        Query::Proximity {
            focus,
            direction,
            depth,
        } => proximity(graph, focus, *direction, *depth),
        Query::Path {
            source,
            target,
            direction,
            count,
        } => path(graph, source, target, (*direction).into(), *count),
        Query::Connection { targets, count } => {
            let distinct: Vec<String> = crate::utils::sets::collect_unique(targets.iter().cloned());
            connection(graph, &distinct, *count)
        }
    };
    log::debug!(
        "Traversal found {} nodes and {} links",
        result.nodes.len(),
        result.links.len()
    );
    Ok(result)
}
