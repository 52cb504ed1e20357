//! Module for reading Models
pub mod json;
