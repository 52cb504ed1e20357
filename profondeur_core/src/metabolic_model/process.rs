//! This module provides the process struct, a named biological pathway grouping reactions
use std::fmt::{Display, Formatter};

/// A biological process (pathway or subsystem)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Process {
    /// Used to identify the process
    pub id: String,
    /// Human readable name
    pub name: Option<String>,
}

impl Process {
    pub fn new(id: &str, name: Option<&str>) -> Self {
        Process {
            id: id.to_string(),
            name: name.map(String::from),
        }
    }
}

impl Display for Process {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
