//! The active half of the crate: the dispatch engine and its lifecycle.
//!
//! A [`Machine`] wraps a shared [`Chart`](crate::core::Chart) and an owned
//! hooks value. Its life runs construction → initial descent → running →
//! terminated, with `reset` looping back to the start.

mod engine;

pub use engine::{ChartFor, Machine, Position};
