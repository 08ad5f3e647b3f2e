//! Host hook contract: entry/exit notifications, guard evaluation, and
//! action execution.
//!
//! The engine never interprets guard or action identifiers; it hands them
//! to the host and trusts the answers. All calls are synchronous and run on
//! the dispatching thread.

use super::event::Event;
use super::state::State;
use std::fmt::Debug;

/// Marker for guard and action identifiers handed to the host.
///
/// Identifiers are opaque to the engine; any small copyable value
/// (typically a fieldless enum) qualifies via the blanket impl.
pub trait Ident: Copy + PartialEq + Eq + Debug + Send + Sync + 'static {}

impl<T: Copy + PartialEq + Eq + Debug + Send + Sync + 'static> Ident for T {}

/// The capability set a host implements to observe and steer a machine.
///
/// One transition produces calls in a fixed order: exits (innermost first),
/// then the transition action, then entries (outermost first) including the
/// default-substate descent. Guards are evaluated during handler resolution,
/// before any exit fires, and a `false` return sends the search to the
/// enclosing state.
///
/// Hooks must not call back into the machine; the machine owns its hooks
/// value, so the borrow checker already rules that out for safe code.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Event, Hooks, State};
/// use statecraft::state_enum;
///
/// state_enum! {
///     pub enum LampState {
///         Off,
///         On,
///     }
/// }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// pub enum LampEvent {
///     Toggle,
/// }
///
/// impl Event for LampEvent {
///     fn name(self) -> &'static str {
///         "Toggle"
///     }
/// }
///
/// struct Recorder {
///     log: Vec<String>,
/// }
///
/// impl Hooks for Recorder {
///     type State = LampState;
///     type Event = LampEvent;
///     type Guard = ();
///     type Action = ();
///
///     fn on_entry(&mut self, state: LampState) {
///         self.log.push(format!("enter {}", state.name()));
///     }
///
///     fn on_exit(&mut self, state: LampState) {
///         self.log.push(format!("exit {}", state.name()));
///     }
///
///     fn guard(&mut self, _source: LampState, _event: LampEvent, _guard: ()) -> bool {
///         true
///     }
///
///     fn action(&mut self, _source: LampState, _event: Option<LampEvent>, _action: ()) {}
/// }
/// ```
pub trait Hooks {
    /// State enum of the chart this host drives.
    type State: State;
    /// Event enum of the chart this host drives.
    type Event: Event;
    /// Guard identifier vocabulary.
    type Guard: Ident;
    /// Action identifier vocabulary.
    type Action: Ident;

    /// Called once per entered state, outermost first.
    fn on_entry(&mut self, state: Self::State);

    /// Called once per exited state, innermost first.
    fn on_exit(&mut self, state: Self::State);

    /// Evaluate a guard attached to a handler defined on `source`.
    ///
    /// Returning `false` makes the engine continue the handler search at
    /// `source`'s parent.
    fn guard(&mut self, source: Self::State, event: Self::Event, guard: Self::Guard) -> bool;

    /// Execute an action.
    ///
    /// `source` is the state whose handler (or entry/exit clause, or
    /// root-initial transition) carries the action. `event` is `None`
    /// exactly when the action belongs to the initial descent, which no
    /// event triggers.
    fn action(&mut self, source: Self::State, event: Option<Self::Event>, action: Self::Action);
}
