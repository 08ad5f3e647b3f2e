//! Build errors for chart construction.

use thiserror::Error;

/// Errors that can occur when validating a chart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Root-initial target not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State '{state}' referenced but never declared")]
    UndeclaredState { state: &'static str },

    #[error("State '{state}' declared more than once")]
    DuplicateState { state: &'static str },

    #[error("State index {index} out of range for a chart of {count} states")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Default substate '{substate}' of '{composite}' is not one of its direct children")]
    DefaultNotChild {
        composite: &'static str,
        substate: &'static str,
    },

    #[error("Containment of '{state}' loops back on itself")]
    CyclicContainment { state: &'static str },

    #[error("Duplicate handler on '{source_state}' for event '{event}'")]
    DuplicateHandler {
        source_state: &'static str,
        event: &'static str,
    },

    #[error("Handler on '{source_state}' for event '{event}' mixes kind and target inconsistently")]
    MalformedHandler {
        source_state: &'static str,
        event: &'static str,
    },

    #[error("Event '{event}' is reserved for termination and cannot carry handlers")]
    ReservedEvent { event: &'static str },
}
