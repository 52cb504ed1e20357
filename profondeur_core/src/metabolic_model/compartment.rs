//! This module provides the compartment struct, a region of the cell in which metabolites reside
use std::fmt::{Display, Formatter};

/// A cellular compartment
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Compartment {
    /// Used to identify the compartment, for example `c` or `e`
    pub id: String,
    /// Human readable name, for example `cytosol`
    pub name: Option<String>,
}

impl Compartment {
    pub fn new(id: &str, name: Option<&str>) -> Self {
        Compartment {
            id: id.to_string(),
            name: name.map(String::from),
        }
    }
}

impl Display for Compartment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
