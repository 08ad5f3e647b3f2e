//! Builder API for chart construction.
//!
//! This module provides the fluent [`ChartBuilder`] plus the
//! [`state_enum!`](crate::state_enum) / [`event_enum!`](crate::event_enum)
//! macros for declaring vocabularies with minimal boilerplate. All
//! topology checks happen in [`ChartBuilder::build`]; a machine never sees
//! an unvalidated chart.

pub mod chart;
pub mod error;
pub mod macros;

pub use chart::ChartBuilder;
pub use error::BuildError;
