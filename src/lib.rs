//! Statecraft: a hierarchical state machine runtime
//!
//! Statecraft runs statecharts with nested composite states. A static
//! [`Chart`] describes the containment tree, default substates, and
//! per-state event handlers; a [`Machine`] holds the single active leaf
//! and dispatches events against it, calling back into host-supplied
//! [`Hooks`] for entry/exit notifications, guard evaluation, and actions.
//!
//! # Core Concepts
//!
//! - **Chart**: validated read-only topology, shared by any number of
//!   machines
//! - **Hooks**: the host capability set; guards and actions are opaque
//!   identifiers the engine hands back to the host
//! - **Machine**: the dispatch engine; resolves a handler by walking the
//!   ancestor chain from the active leaf, then emits exits (innermost
//!   first), the transition action, and entries (outermost first) down to
//!   the next leaf
//!
//! Dispatch is synchronous and single-threaded: one event runs to
//! completion before `dispatch` returns, and there is no internal queue.
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::ChartBuilder;
//! use statecraft::core::{Handler, Hooks};
//! use statecraft::machine::{Machine, Position};
//! use statecraft::{event_enum, state_enum};
//! use std::sync::Arc;
//!
//! state_enum! {
//!     pub enum CallState {
//!         Idle,
//!         Connected,
//!         Ringing,
//!         Talking,
//!     }
//! }
//!
//! event_enum! {
//!     pub enum CallEvent {
//!         Dial,
//!         Answer,
//!         HangUp,
//!     }
//! }
//!
//! struct Silent;
//!
//! impl Hooks for Silent {
//!     type State = CallState;
//!     type Event = CallEvent;
//!     type Guard = ();
//!     type Action = ();
//!
//!     fn on_entry(&mut self, _state: CallState) {}
//!     fn on_exit(&mut self, _state: CallState) {}
//!     fn guard(&mut self, _source: CallState, _event: CallEvent, _guard: ()) -> bool {
//!         true
//!     }
//!     fn action(&mut self, _source: CallState, _event: Option<CallEvent>, _action: ()) {}
//! }
//!
//! let chart = ChartBuilder::new()
//!     .leaf(CallState::Idle, None)
//!     .composite(CallState::Connected, None, CallState::Ringing)
//!     .leaf(CallState::Ringing, Some(CallState::Connected))
//!     .leaf(CallState::Talking, Some(CallState::Connected))
//!     .initial(CallState::Idle)
//!     .handler(Handler::external(
//!         CallState::Idle,
//!         CallEvent::Dial,
//!         CallState::Connected,
//!     ))
//!     .handler(Handler::external(
//!         CallState::Ringing,
//!         CallEvent::Answer,
//!         CallState::Talking,
//!     ))
//!     .handler(Handler::external(
//!         CallState::Connected,
//!         CallEvent::HangUp,
//!         CallState::Idle,
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let mut machine = Machine::new(Arc::new(chart), Silent);
//! machine.start();
//!
//! machine.dispatch(CallEvent::Dial);
//! assert_eq!(machine.state(), Position::Active(CallState::Ringing));
//!
//! machine.dispatch(CallEvent::Answer);
//! assert_eq!(machine.state(), Position::Active(CallState::Talking));
//!
//! // HangUp is defined on the enclosing Connected state, so it applies
//! // from any substate.
//! machine.dispatch(CallEvent::HangUp);
//! assert_eq!(machine.state(), Position::Active(CallState::Idle));
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use self::builder::{BuildError, ChartBuilder};
pub use self::core::{Chart, Event, Handler, Hooks, Ident, State, TransitionKind};
pub use self::machine::{ChartFor, Machine, Position};
