//! triageset - interesting files rule engine
//!
//! This library exposes the rule model, the definitions store with its
//! standard-set reconciliation, and the ingest layer that applies the
//! enabled sets to files during a job.

pub mod config;
pub mod constants;
pub mod definitions;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod rules;
pub mod scan;
