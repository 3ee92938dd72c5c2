//! # Aero Graph
//!
//! Neo4j mirror of the aero relational store.
//!
//! Provides the graph client, constraint/index initialization, and the
//! sync pipeline that mirrors workflows, versions, agents, and the
//! domain hierarchy into the graph, then links company opportunities.

pub mod client;
pub mod schema;
pub mod sync;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use schema::initialize_schema;
pub use sync::{run_full_sync, summary_counts, FullSyncReport, GraphSummary, SyncResult};
