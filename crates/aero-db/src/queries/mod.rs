//! Database query implementations.

pub mod agents;
pub mod data_entities;
pub mod mappings;
pub mod workflows;
