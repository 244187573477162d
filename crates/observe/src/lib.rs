//! Observability glue shared by all crates in this workspace: tracing
//! initialization and the global metrics registry.
pub mod metrics;
pub mod tracing;
