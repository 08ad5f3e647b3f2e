//! Builder for constructing validated charts.

use crate::builder::error::BuildError;
use crate::core::{Chart, Event, Handler, Ident, Node, State, TransitionKind};

/// Builder for charts with a fluent API.
///
/// Declare every variant of the state enum exactly once with
/// [`leaf`](Self::leaf) or [`composite`](Self::composite), name the
/// root-initial target, add handlers, then [`build`](Self::build) to
/// validate the whole topology at once.
///
/// ```rust
/// use statecraft::builder::ChartBuilder;
/// use statecraft::core::Handler;
/// use statecraft::{event_enum, state_enum};
///
/// state_enum! {
///     pub enum PlayerState {
///         Stopped,
///         Playing,
///         Loading,
///         Rendering,
///     }
/// }
///
/// event_enum! {
///     pub enum PlayerEvent {
///         Play,
///         Stop,
///         Loaded,
///     }
/// }
///
/// let chart = ChartBuilder::<_, _, (), ()>::new()
///     .leaf(PlayerState::Stopped, None)
///     .composite(PlayerState::Playing, None, PlayerState::Loading)
///     .leaf(PlayerState::Loading, Some(PlayerState::Playing))
///     .leaf(PlayerState::Rendering, Some(PlayerState::Playing))
///     .initial(PlayerState::Stopped)
///     .handler(Handler::external(
///         PlayerState::Stopped,
///         PlayerEvent::Play,
///         PlayerState::Playing,
///     ))
///     .handler(Handler::external(
///         PlayerState::Loading,
///         PlayerEvent::Loaded,
///         PlayerState::Rendering,
///     ))
///     .handler(Handler::external(
///         PlayerState::Playing,
///         PlayerEvent::Stop,
///         PlayerState::Stopped,
///     ))
///     .build()
///     .unwrap();
/// # let _ = chart;
/// ```
pub struct ChartBuilder<S: State, E: Event, G: Ident, A: Ident> {
    declared: Vec<Option<NodeDecl<S, A>>>,
    handlers: Vec<Handler<S, E, G, A>>,
    initial: Option<S>,
    initial_action: Option<A>,
    terminate: Option<E>,
    /// First declaration error, reported by `build`.
    deferred: Option<BuildError>,
}

struct NodeDecl<S, A> {
    state: S,
    parent: Option<S>,
    initial: Option<S>,
    entry_actions: Vec<A>,
    exit_actions: Vec<A>,
}

impl<S: State, E: Event, G: Ident, A: Ident> ChartBuilder<S, E, G, A> {
    /// Create a new builder.
    pub fn new() -> Self {
        let mut declared = Vec::with_capacity(S::COUNT);
        declared.resize_with(S::COUNT, || None);
        Self {
            declared,
            handlers: Vec::new(),
            initial: None,
            initial_action: None,
            terminate: None,
            deferred: None,
        }
    }

    /// Declare a leaf state under `parent` (`None` = top level).
    pub fn leaf(self, state: S, parent: Option<S>) -> Self {
        self.declare(state, parent, None)
    }

    /// Declare a composite state under `parent` with its default substate.
    pub fn composite(self, state: S, parent: Option<S>, initial: S) -> Self {
        self.declare(state, parent, Some(initial))
    }

    fn declare(mut self, state: S, parent: Option<S>, initial: Option<S>) -> Self {
        if state.index() >= S::COUNT {
            self.defer(BuildError::IndexOutOfRange {
                index: state.index(),
                count: S::COUNT,
            });
            return self;
        }
        if self.declared[state.index()].is_some() {
            self.defer(BuildError::DuplicateState {
                state: state.name(),
            });
            return self;
        }
        self.declared[state.index()] = Some(NodeDecl {
            state,
            parent,
            initial,
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
        });
        self
    }

    /// Set the root-initial target (required). The target may be composite;
    /// the machine descends through default substates from it.
    pub fn initial(mut self, target: S) -> Self {
        self.initial = Some(target);
        self
    }

    /// Attach an action to the root-initial transition. It fires exactly
    /// once, after the entries of the initial descent.
    pub fn initial_action(mut self, action: A) -> Self {
        self.initial_action = Some(action);
        self
    }

    /// Reserve `event` for termination: dispatching it from any state moves
    /// the machine to the final pseudostate without callbacks.
    pub fn terminate_on(mut self, event: E) -> Self {
        self.terminate = Some(event);
        self
    }

    /// Append an action fired right after `state` is entered.
    pub fn entry_action(mut self, state: S, action: A) -> Self {
        match self.decl_mut(state) {
            Some(decl) => decl.entry_actions.push(action),
            None => self.defer(BuildError::UndeclaredState {
                state: state.name(),
            }),
        }
        self
    }

    /// Append an action fired right before `state` is exited.
    pub fn exit_action(mut self, state: S, action: A) -> Self {
        match self.decl_mut(state) {
            Some(decl) => decl.exit_actions.push(action),
            None => self.defer(BuildError::UndeclaredState {
                state: state.name(),
            }),
        }
        self
    }

    /// Add a handler.
    pub fn handler(mut self, handler: Handler<S, E, G, A>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Validate the declarations and produce the chart.
    pub fn build(self) -> Result<Chart<S, E, G, A>, BuildError> {
        if let Some(err) = self.deferred {
            return Err(err);
        }

        let mut nodes = Vec::with_capacity(S::COUNT);
        for decl in &self.declared {
            let decl = match decl {
                Some(decl) => decl,
                // The trait has no index-to-variant mapping, so the missing
                // state cannot be named here.
                None => {
                    return Err(BuildError::UndeclaredState {
                        state: "<undeclared variant>",
                    })
                }
            };
            if let Some(parent) = decl.parent {
                self.check_declared(parent)?;
            }
            if let Some(initial) = decl.initial {
                self.check_declared(initial)?;
                let child = self.decl(initial);
                if child.map(|c| c.parent) != Some(Some(decl.state)) {
                    return Err(BuildError::DefaultNotChild {
                        composite: decl.state.name(),
                        substate: initial.name(),
                    });
                }
            }
            nodes.push(Node {
                parent: decl.parent,
                initial: decl.initial,
                entry_actions: decl.entry_actions.clone(),
                exit_actions: decl.exit_actions.clone(),
            });
        }

        // A parent chain longer than the state count must loop.
        for decl in self.declared.iter().flatten() {
            let mut cursor = decl.parent;
            let mut steps = 0;
            while let Some(up) = cursor {
                steps += 1;
                if steps > S::COUNT {
                    return Err(BuildError::CyclicContainment {
                        state: decl.state.name(),
                    });
                }
                cursor = self.decl(up).and_then(|d| d.parent);
            }
        }

        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        self.check_declared(initial)?;

        let mut handlers: Vec<Vec<Handler<S, E, G, A>>> = Vec::with_capacity(S::COUNT);
        handlers.resize_with(S::COUNT, Vec::new);
        for handler in &self.handlers {
            self.check_declared(handler.source)?;
            if let Some(target) = handler.target {
                self.check_declared(target)?;
            }
            let malformed = match handler.kind {
                TransitionKind::External => handler.target.is_none(),
                TransitionKind::Internal => handler.target.is_some(),
            };
            if malformed {
                return Err(BuildError::MalformedHandler {
                    source_state: handler.source.name(),
                    event: handler.event.name(),
                });
            }
            if self.terminate == Some(handler.event) {
                return Err(BuildError::ReservedEvent {
                    event: handler.event.name(),
                });
            }
            let slot = &mut handlers[handler.source.index()];
            if slot.iter().any(|h| h.event == handler.event) {
                return Err(BuildError::DuplicateHandler {
                    source_state: handler.source.name(),
                    event: handler.event.name(),
                });
            }
            slot.push(*handler);
        }

        Ok(Chart {
            nodes,
            handlers,
            initial,
            initial_action: self.initial_action,
            terminate: self.terminate,
        })
    }

    fn decl(&self, state: S) -> Option<&NodeDecl<S, A>> {
        self.declared.get(state.index()).and_then(|d| d.as_ref())
    }

    fn decl_mut(&mut self, state: S) -> Option<&mut NodeDecl<S, A>> {
        self.declared
            .get_mut(state.index())
            .and_then(|d| d.as_mut())
    }

    fn check_declared(&self, state: S) -> Result<(), BuildError> {
        match self.decl(state) {
            Some(_) => Ok(()),
            None => Err(BuildError::UndeclaredState {
                state: state.name(),
            }),
        }
    }

    fn defer(&mut self, err: BuildError) {
        if self.deferred.is_none() {
            self.deferred = Some(err);
        }
    }
}

impl<S: State, E: Event, G: Ident, A: Ident> Default for ChartBuilder<S, E, G, A> {
    fn default() -> Self {
        Self::new()
    }
}
