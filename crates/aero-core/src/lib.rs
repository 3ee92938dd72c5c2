//! Aero Core Library
//!
//! Domain logic for the airline data-mapping pipelines: the static
//! rule tables, the keyword matcher, and the association writers.

pub mod error;
pub mod mapping;

pub use error::{CoreError, CoreResult};
