//! The dispatch engine: owns the current position, resolves handlers along
//! the ancestor chain, and emits the exit/action/entry callback sequence.

use crate::core::{Chart, Event, Hooks, State, TransitionKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The chart type a hooks implementation drives.
pub type ChartFor<H> = Chart<
    <H as Hooks>::State,
    <H as Hooks>::Event,
    <H as Hooks>::Guard,
    <H as Hooks>::Action,
>;

/// Observable machine position.
///
/// The pre-start and post-terminate pseudostates wrap the user state enum
/// here instead of living inside it, so charts cannot reference them and
/// terminate cannot emit typed callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Position<S: State> {
    /// Constructed or reset; the initial descent has not run.
    Initial,
    /// Running. Outside a dispatch this is always a leaf state.
    Active(S),
    /// Terminated; absorbing.
    Final,
}

impl<S: State> Position<S> {
    /// The active leaf, if running.
    pub fn leaf(self) -> Option<S> {
        match self {
            Position::Active(state) => Some(state),
            _ => None,
        }
    }
}

/// A running hierarchical state machine.
///
/// The machine holds a shared read-only [`Chart`], an owned hooks value,
/// and its current [`Position`]; nothing else. Dispatch is synchronous and
/// runs to completion on the calling thread.
///
/// Lifecycle: construction places the machine before its initial descent;
/// [`start`](Self::start) (or the first [`dispatch`](Self::dispatch))
/// performs the descent exactly once; the reserved terminate event moves it
/// to the absorbing final position; [`reset`](Self::reset) returns it to
/// the beginning without emitting exits.
pub struct Machine<H: Hooks> {
    chart: Arc<ChartFor<H>>,
    hooks: H,
    current: Position<H::State>,
}

impl<H: Hooks> Machine<H> {
    /// Create a machine over `chart` driving `hooks`. No callbacks fire
    /// until the initial descent.
    pub fn new(chart: Arc<ChartFor<H>>, hooks: H) -> Self {
        Self {
            chart,
            hooks,
            current: Position::Initial,
        }
    }

    /// Current position.
    pub fn state(&self) -> Position<H::State> {
        self.current
    }

    /// True once the terminate event has been dispatched.
    pub fn terminated(&self) -> bool {
        matches!(self.current, Position::Final)
    }

    /// Shared access to the hooks value.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the hooks value.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Perform the initial descent: enter from the outermost state down to
    /// the root-initial target, descend default substates to a leaf, then
    /// fire the root-initial action. Idempotent; does nothing once the
    /// machine has started or terminated.
    pub fn start(&mut self) {
        if !matches!(self.current, Position::Initial) {
            return;
        }
        let chart = Arc::clone(&self.chart);
        let target = chart.initial_target();

        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(state) = cursor {
            path.push(state);
            cursor = chart.parent(state);
        }
        for &state in path.iter().rev() {
            self.enter(&chart, state, None);
        }
        let leaf = self.descend(&chart, target, None);

        if let Some(action) = chart.initial_action() {
            if let Some(&outermost) = path.last() {
                self.hooks.action(outermost, None, action);
            }
        }

        tracing::debug!(leaf = leaf.name(), "initial descent complete");
        self.current = Position::Active(leaf);
    }

    /// Return to the pre-start position without emitting exits. A later
    /// `start` re-runs the initial descent.
    pub fn reset(&mut self) {
        tracing::debug!("machine reset");
        self.current = Position::Initial;
    }

    /// Process one event.
    ///
    /// Runs the initial descent first if it has not happened yet. Resolves
    /// a handler by walking the ancestor chain from the active leaf: an
    /// unguarded handler is chosen outright, a guarded one only if the host
    /// approves, and a rejected guard resumes the search at the parent.
    /// With no handler anywhere along the chain the event is ignored.
    /// After termination this is a no-op.
    pub fn dispatch(&mut self, event: H::Event) {
        let leaf = match self.current {
            Position::Final => return,
            Position::Initial => {
                self.start();
                match self.current {
                    Position::Active(leaf) => leaf,
                    _ => return,
                }
            }
            Position::Active(leaf) => leaf,
        };

        if self.chart.is_terminate(event) {
            tracing::debug!(event = event.name(), "terminated");
            self.current = Position::Final;
            return;
        }

        let chart = Arc::clone(&self.chart);
        let mut cursor = Some(leaf);
        while let Some(source) = cursor {
            if let Some(handler) = chart.handler(source, event) {
                let chosen = match handler.guard {
                    Some(guard) => self.hooks.guard(source, event, guard),
                    None => true,
                };
                if chosen {
                    match handler.kind {
                        TransitionKind::Internal => {
                            tracing::trace!(
                                source = source.name(),
                                event = event.name(),
                                "internal transition"
                            );
                            if let Some(action) = handler.action {
                                self.hooks.action(source, Some(event), action);
                            }
                        }
                        TransitionKind::External => {
                            if let Some(target) = handler.target {
                                self.transition(&chart, leaf, source, target, event, handler.action);
                            }
                        }
                    }
                    return;
                }
            }
            cursor = chart.parent(source);
        }

        tracing::trace!(state = leaf.name(), event = event.name(), "event ignored");
    }

    /// Execute an external transition from the handler defined on `source`
    /// targeting `target`, with the machine currently at `leaf`.
    fn transition(
        &mut self,
        chart: &ChartFor<H>,
        leaf: H::State,
        source: H::State,
        target: H::State,
        event: H::Event,
        action: Option<H::Action>,
    ) {
        // The boundary stays un-exited: the nearest common ancestor of
        // source and target, except that a self-transition exits and
        // re-enters its own state.
        let boundary = if source == target {
            chart.parent(source)
        } else {
            chart.lca(source, target)
        };

        let mut cursor = Some(leaf);
        while let Some(state) = cursor {
            if Some(state) == boundary {
                break;
            }
            self.exit(chart, state, event);
            cursor = chart.parent(state);
        }

        if let Some(action) = action {
            self.hooks.action(source, Some(event), action);
        }

        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(state) = cursor {
            if Some(state) == boundary {
                break;
            }
            path.push(state);
            cursor = chart.parent(state);
        }
        for &state in path.iter().rev() {
            self.enter(chart, state, Some(event));
        }
        let new_leaf = self.descend(chart, target, Some(event));

        tracing::debug!(
            source = leaf.name(),
            target = new_leaf.name(),
            event = event.name(),
            "transition"
        );
        self.current = Position::Active(new_leaf);
    }

    /// Enter `state`: the entry hook, then its entry actions.
    fn enter(&mut self, chart: &ChartFor<H>, state: H::State, event: Option<H::Event>) {
        self.hooks.on_entry(state);
        for &action in chart.entry_actions(state) {
            self.hooks.action(state, event, action);
        }
    }

    /// Exit `state`: its exit actions, then the exit hook.
    fn exit(&mut self, chart: &ChartFor<H>, state: H::State, event: H::Event) {
        for &action in chart.exit_actions(state) {
            self.hooks.action(state, Some(event), action);
        }
        self.hooks.on_exit(state);
    }

    /// Follow default substates from `from` down to a leaf, entering each.
    fn descend(&mut self, chart: &ChartFor<H>, from: H::State, event: Option<H::Event>) -> H::State {
        let mut leaf = from;
        while let Some(substate) = chart.default_substate(leaf) {
            self.enter(chart, substate, event);
            leaf = substate;
        }
        leaf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ChartBuilder;
    use crate::core::Handler;
    use crate::{event_enum, state_enum};

    state_enum! {
        enum RunState {
            Running,
            Walk,
            Sprint,
            Resting,
        }
    }

    event_enum! {
        enum RunEvent {
            Faster,
            Slower,
            Halt,
            Nudge,
            Swap,
            Quit,
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum RunGuard {
        HasEnergy,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum RunAction {
        Cheer,
    }

    struct RunHooks {
        log: Vec<String>,
        energy: bool,
    }

    impl RunHooks {
        fn new() -> Self {
            Self {
                log: Vec::new(),
                energy: false,
            }
        }
    }

    impl Hooks for RunHooks {
        type State = RunState;
        type Event = RunEvent;
        type Guard = RunGuard;
        type Action = RunAction;

        fn on_entry(&mut self, state: RunState) {
            self.log.push(format!("enter {}", state.name()));
        }

        fn on_exit(&mut self, state: RunState) {
            self.log.push(format!("exit {}", state.name()));
        }

        fn guard(&mut self, _source: RunState, _event: RunEvent, guard: RunGuard) -> bool {
            self.log.push(format!("guard {guard:?}"));
            match guard {
                RunGuard::HasEnergy => self.energy,
            }
        }

        fn action(&mut self, _source: RunState, _event: Option<RunEvent>, action: RunAction) {
            self.log.push(format!("action {action:?}"));
        }
    }

    fn run_chart() -> Arc<Chart<RunState, RunEvent, RunGuard, RunAction>> {
        let chart = ChartBuilder::new()
            .composite(RunState::Running, None, RunState::Walk)
            .leaf(RunState::Walk, Some(RunState::Running))
            .leaf(RunState::Sprint, Some(RunState::Running))
            .leaf(RunState::Resting, None)
            .initial(RunState::Resting)
            .terminate_on(RunEvent::Quit)
            .handler(
                Handler::external(RunState::Walk, RunEvent::Faster, RunState::Sprint)
                    .guarded(RunGuard::HasEnergy),
            )
            .handler(Handler::external(
                RunState::Sprint,
                RunEvent::Slower,
                RunState::Walk,
            ))
            .handler(Handler::external(
                RunState::Running,
                RunEvent::Halt,
                RunState::Resting,
            ))
            .handler(Handler::external(
                RunState::Resting,
                RunEvent::Nudge,
                RunState::Running,
            ))
            .handler(Handler::external(
                RunState::Running,
                RunEvent::Swap,
                RunState::Running,
            ))
            .handler(Handler::internal(RunState::Running, RunEvent::Nudge).with_action(RunAction::Cheer))
            .build()
            .unwrap();
        Arc::new(chart)
    }

    fn running_machine() -> Machine<RunHooks> {
        let mut machine = Machine::new(run_chart(), RunHooks::new());
        machine.start();
        machine.dispatch(RunEvent::Nudge);
        machine.hooks_mut().log.clear();
        machine
    }

    #[test]
    fn construction_emits_nothing() {
        let machine = Machine::new(run_chart(), RunHooks::new());
        assert_eq!(machine.state(), Position::Initial);
        assert!(!machine.terminated());
        assert!(machine.hooks().log.is_empty());
    }

    #[test]
    fn start_runs_initial_descent_once() {
        let mut machine = Machine::new(run_chart(), RunHooks::new());
        machine.start();
        assert_eq!(machine.hooks().log, vec!["enter Resting"]);
        assert_eq!(machine.state(), Position::Active(RunState::Resting));

        machine.start();
        assert_eq!(machine.hooks().log.len(), 1);
    }

    #[test]
    fn dispatch_starts_implicitly_then_handles_the_event() {
        let mut machine = Machine::new(run_chart(), RunHooks::new());
        machine.dispatch(RunEvent::Nudge);
        assert_eq!(
            machine.hooks().log,
            vec!["enter Resting", "exit Resting", "enter Running", "enter Walk"]
        );
        assert_eq!(machine.state(), Position::Active(RunState::Walk));
    }

    #[test]
    fn entering_a_composite_descends_to_its_default_substate() {
        let mut machine = running_machine();
        assert_eq!(machine.state(), Position::Active(RunState::Walk));
    }

    #[test]
    fn rejected_guard_drops_the_event_when_no_ancestor_handles_it() {
        let mut machine = running_machine();
        machine.dispatch(RunEvent::Faster);
        assert_eq!(machine.hooks().log, vec!["guard HasEnergy"]);
        assert_eq!(machine.state(), Position::Active(RunState::Walk));
    }

    #[test]
    fn approved_guard_fires_the_transition() {
        let mut machine = running_machine();
        machine.hooks_mut().energy = true;
        machine.dispatch(RunEvent::Faster);
        assert_eq!(
            machine.hooks().log,
            vec!["guard HasEnergy", "exit Walk", "enter Sprint"]
        );
        assert_eq!(machine.state(), Position::Active(RunState::Sprint));
    }

    #[test]
    fn internal_transition_runs_action_only() {
        let mut machine = running_machine();
        machine.dispatch(RunEvent::Nudge);
        assert_eq!(machine.hooks().log, vec!["action Cheer"]);
        assert_eq!(machine.state(), Position::Active(RunState::Walk));
    }

    #[test]
    fn self_transition_exits_and_reenters_its_source() {
        let mut machine = running_machine();
        machine.dispatch(RunEvent::Swap);
        assert_eq!(
            machine.hooks().log,
            vec![
                "exit Walk",
                "exit Running",
                "enter Running",
                "enter Walk"
            ]
        );
        assert_eq!(machine.state(), Position::Active(RunState::Walk));
    }

    #[test]
    fn ancestor_handles_what_the_leaf_ignores() {
        let mut machine = running_machine();
        machine.dispatch(RunEvent::Halt);
        assert_eq!(
            machine.hooks().log,
            vec!["exit Walk", "exit Running", "enter Resting"]
        );
        assert_eq!(machine.state(), Position::Active(RunState::Resting));
    }

    #[test]
    fn unknown_event_is_ignored() {
        let mut machine = Machine::new(run_chart(), RunHooks::new());
        machine.start();
        machine.hooks_mut().log.clear();
        machine.dispatch(RunEvent::Faster);
        assert!(machine.hooks().log.is_empty());
        assert_eq!(machine.state(), Position::Active(RunState::Resting));
    }

    #[test]
    fn terminate_is_silent_and_absorbing() {
        let mut machine = running_machine();
        machine.dispatch(RunEvent::Quit);
        assert!(machine.hooks().log.is_empty());
        assert_eq!(machine.state(), Position::Final);
        assert!(machine.terminated());

        machine.dispatch(RunEvent::Nudge);
        assert!(machine.hooks().log.is_empty());
        assert_eq!(machine.state(), Position::Final);
    }

    #[test]
    fn reset_returns_to_the_beginning_without_exits() {
        let mut machine = running_machine();
        machine.dispatch(RunEvent::Quit);
        machine.reset();
        assert_eq!(machine.state(), Position::Initial);
        assert!(!machine.terminated());
        assert!(machine.hooks().log.is_empty());

        machine.start();
        assert_eq!(machine.hooks().log, vec!["enter Resting"]);
    }

    #[test]
    fn entry_and_exit_actions_wrap_the_hooks() {
        let chart = ChartBuilder::new()
            .composite(RunState::Running, None, RunState::Walk)
            .leaf(RunState::Walk, Some(RunState::Running))
            .leaf(RunState::Sprint, Some(RunState::Running))
            .leaf(RunState::Resting, None)
            .initial(RunState::Resting)
            .handler(Handler::external(
                RunState::Resting,
                RunEvent::Nudge,
                RunState::Running,
            ))
            .exit_action(RunState::Resting, RunAction::Cheer)
            .entry_action(RunState::Running, RunAction::Cheer)
            .build()
            .unwrap();
        let mut machine = Machine::new(Arc::new(chart), RunHooks::new());
        machine.start();
        machine.hooks_mut().log.clear();

        machine.dispatch(RunEvent::Nudge);
        assert_eq!(
            machine.hooks().log,
            vec![
                "action Cheer",
                "exit Resting",
                "enter Running",
                "action Cheer",
                "enter Walk"
            ]
        );
    }
}
