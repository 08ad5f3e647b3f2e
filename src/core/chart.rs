//! Static chart topology: containment tree, default substates, and
//! per-state event handlers.
//!
//! A [`Chart`] is immutable after construction and shared read-only by any
//! number of machines. Build one with
//! [`ChartBuilder`](crate::builder::ChartBuilder), which validates the
//! topology before handing it out.

use super::event::Event;
use super::hooks::Ident;
use super::state::State;
use serde::{Deserialize, Serialize};

/// Whether a handler changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Exits up to the transition boundary and re-enters down to the
    /// target. A source equal to its target exits and re-enters itself.
    External,
    /// Runs the action only; no exits, no entries, no state change.
    Internal,
}

/// One `(source, event)` handler record.
///
/// Constructed with [`Handler::external`] or [`Handler::internal`] and
/// refined fluently:
///
/// ```rust
/// use statecraft::core::Handler;
///
/// let handler = Handler::external("armed", 'd', "disarmed")
///     .guarded("code_accepted")
///     .with_action("release_bolt");
/// # let _ = handler;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handler<S, E, G, A> {
    /// State this handler is defined on.
    pub source: S,
    /// Triggering event.
    pub event: E,
    /// Guard identifier evaluated by the host before the handler is chosen.
    pub guard: Option<G>,
    /// Action identifier executed between exits and entries.
    pub action: Option<A>,
    /// Target state; `None` for internal handlers.
    pub target: Option<S>,
    /// External or internal.
    pub kind: TransitionKind,
}

impl<S, E, G, A> Handler<S, E, G, A> {
    /// An external transition from `source` to `target` on `event`.
    pub fn external(source: S, event: E, target: S) -> Self {
        Self {
            source,
            event,
            guard: None,
            action: None,
            target: Some(target),
            kind: TransitionKind::External,
        }
    }

    /// An internal transition on `source`: consumes `event`, runs the
    /// action if any, changes nothing else.
    pub fn internal(source: S, event: E) -> Self {
        Self {
            source,
            event,
            guard: None,
            action: None,
            target: None,
            kind: TransitionKind::Internal,
        }
    }

    /// Attach a guard identifier.
    pub fn guarded(mut self, guard: G) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Attach an action identifier.
    pub fn with_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }
}

/// Per-state topology record.
#[derive(Clone, Debug)]
pub(crate) struct Node<S, A> {
    /// Enclosing state; `None` for top-level states.
    pub(crate) parent: Option<S>,
    /// Default substate taken when this state is entered without a deeper
    /// explicit target; `None` for leaves.
    pub(crate) initial: Option<S>,
    /// Actions fired right after `on_entry` for this state.
    pub(crate) entry_actions: Vec<A>,
    /// Actions fired right before `on_exit` for this state.
    pub(crate) exit_actions: Vec<A>,
}

/// Validated, immutable chart: the containment tree plus handler tables.
///
/// Node and handler tables are indexed by [`State::index`]; lookups are
/// array reads and short scans, never allocation.
#[derive(Clone, Debug)]
pub struct Chart<S: State, E: Event, G: Ident, A: Ident> {
    pub(crate) nodes: Vec<Node<S, A>>,
    pub(crate) handlers: Vec<Vec<Handler<S, E, G, A>>>,
    pub(crate) initial: S,
    pub(crate) initial_action: Option<A>,
    pub(crate) terminate: Option<E>,
}

impl<S: State, E: Event, G: Ident, A: Ident> Chart<S, E, G, A> {
    /// Enclosing state of `state`, or `None` at the top level.
    pub fn parent(&self, state: S) -> Option<S> {
        self.nodes[state.index()].parent
    }

    /// Default substate of `state`, or `None` for a leaf.
    pub fn default_substate(&self, state: S) -> Option<S> {
        self.nodes[state.index()].initial
    }

    /// True if `state` has no substates.
    pub fn is_leaf(&self, state: S) -> bool {
        self.nodes[state.index()].initial.is_none()
    }

    /// Actions fired after entering `state`.
    pub fn entry_actions(&self, state: S) -> &[A] {
        &self.nodes[state.index()].entry_actions
    }

    /// Actions fired before exiting `state`.
    pub fn exit_actions(&self, state: S) -> &[A] {
        &self.nodes[state.index()].exit_actions
    }

    /// Handler defined on `state` for `event`, if any. Does not consult
    /// ancestors; the machine walks the chain itself.
    pub fn handler(&self, state: S, event: E) -> Option<Handler<S, E, G, A>> {
        self.handlers[state.index()]
            .iter()
            .find(|h| h.event == event)
            .copied()
    }

    /// Target of the root-initial transition.
    pub fn initial_target(&self) -> S {
        self.initial
    }

    /// Action attached to the root-initial transition.
    pub fn initial_action(&self) -> Option<A> {
        self.initial_action
    }

    /// True if `event` is the reserved terminate event.
    pub fn is_terminate(&self, event: E) -> bool {
        self.terminate == Some(event)
    }

    /// Nesting depth: 0 for top-level states.
    pub fn depth(&self, state: S) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent(state);
        while let Some(up) = cursor {
            depth += 1;
            cursor = self.parent(up);
        }
        depth
    }

    /// Nearest common ancestor of `a` and `b`, where a state counts as its
    /// own ancestor. `None` means the two only meet at the root.
    ///
    /// Walks both parent chains to equal depth, then steps them in
    /// lockstep.
    pub fn lca(&self, a: S, b: S) -> Option<S> {
        let mut a = Some(a);
        let mut b = Some(b);
        let mut depth_a = a.map_or(0, |s| self.depth(s));
        let mut depth_b = b.map_or(0, |s| self.depth(s));
        while depth_a > depth_b {
            a = a.and_then(|s| self.parent(s));
            depth_a -= 1;
        }
        while depth_b > depth_a {
            b = b.and_then(|s| self.parent(s));
            depth_b -= 1;
        }
        while a != b {
            a = a.and_then(|s| self.parent(s));
            b = b.and_then(|s| self.parent(s));
        }
        a
    }
}
