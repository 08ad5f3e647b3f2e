//! Shared fixture: the classic six-state benchmark chart from the
//! statechart literature (Samek's s/s1/s11/s2/s21/s211 machine), plus
//! hooks that record every callback for exact-trace assertions.

#![allow(dead_code)]

use statecraft::builder::ChartBuilder;
use statecraft::core::{Chart, Handler, Hooks};
use statecraft::machine::Machine;
use statecraft::{event_enum, state_enum};
use std::sync::Arc;

state_enum! {
    pub enum SamekState {
        S,
        S1,
        S11,
        S2,
        S21,
        S211,
    }
}

event_enum! {
    pub enum SamekEvent {
        A,
        B,
        C,
        D,
        E,
        F,
        G,
        H,
        I,
        Terminate,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SamekGuard {
    FooIsTrue,
    FooIsFalse,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SamekAction {
    SetFooTrue,
    SetFooFalse,
}

pub const ALL_STATES: [SamekState; 6] = [
    SamekState::S,
    SamekState::S1,
    SamekState::S11,
    SamekState::S2,
    SamekState::S21,
    SamekState::S211,
];

/// The benchmark chart. The root-initial transition targets `s2` and
/// clears `foo`; `s1` consumes `I` below `s` with a no-op internal
/// handler.
pub fn samek_chart() -> Arc<Chart<SamekState, SamekEvent, SamekGuard, SamekAction>> {
    use SamekAction::*;
    use SamekEvent::*;
    use SamekGuard::*;
    use SamekState::*;

    let chart = ChartBuilder::new()
        .composite(S, None, S1)
        .composite(S1, Some(S), S11)
        .leaf(S11, Some(S1))
        .composite(S2, Some(S), S21)
        .composite(S21, Some(S2), S211)
        .leaf(S211, Some(S21))
        .initial(S2)
        .initial_action(SetFooFalse)
        .terminate_on(Terminate)
        .handler(Handler::external(S, E, S11))
        .handler(Handler::internal(S, I).guarded(FooIsTrue).with_action(SetFooFalse))
        .handler(Handler::external(S1, A, S1))
        .handler(Handler::external(S1, B, S11))
        .handler(Handler::external(S1, C, S2))
        .handler(Handler::external(S1, D, S).guarded(FooIsFalse).with_action(SetFooTrue))
        .handler(Handler::external(S1, F, S211))
        .handler(Handler::internal(S1, I))
        .handler(Handler::external(S11, D, S1).guarded(FooIsTrue).with_action(SetFooFalse))
        .handler(Handler::external(S11, G, S211))
        .handler(Handler::external(S11, H, S))
        .handler(Handler::external(S2, C, S1))
        .handler(Handler::external(S2, F, S11))
        .handler(Handler::internal(S2, I).guarded(FooIsFalse).with_action(SetFooTrue))
        .handler(Handler::external(S21, A, S21))
        .handler(Handler::external(S21, B, S211))
        .handler(Handler::external(S21, G, S1))
        .handler(Handler::external(S211, D, S21))
        .handler(Handler::external(S211, H, S))
        .build()
        .expect("benchmark chart is well formed");
    Arc::new(chart)
}

/// Records every callback and implements the `foo` flag the benchmark
/// guards read and its actions write.
pub struct RecordingHooks {
    pub entries: Vec<SamekState>,
    pub exits: Vec<SamekState>,
    pub actions: Vec<SamekAction>,
    pub guard_calls: Vec<SamekGuard>,
    pub guard_sources: Vec<SamekState>,
    pub foo: bool,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            exits: Vec::new(),
            actions: Vec::new(),
            guard_calls: Vec::new(),
            guard_sources: Vec::new(),
            foo: true,
        }
    }

    pub fn reset_logs(&mut self) {
        self.entries.clear();
        self.exits.clear();
        self.actions.clear();
        self.guard_calls.clear();
        self.guard_sources.clear();
    }

    pub fn callback_count(&self) -> usize {
        self.entries.len() + self.exits.len() + self.actions.len() + self.guard_calls.len()
    }
}

impl Default for RecordingHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl Hooks for RecordingHooks {
    type State = SamekState;
    type Event = SamekEvent;
    type Guard = SamekGuard;
    type Action = SamekAction;

    fn on_entry(&mut self, state: SamekState) {
        self.entries.push(state);
    }

    fn on_exit(&mut self, state: SamekState) {
        self.exits.push(state);
    }

    fn guard(&mut self, source: SamekState, _event: SamekEvent, guard: SamekGuard) -> bool {
        self.guard_calls.push(guard);
        self.guard_sources.push(source);
        match guard {
            SamekGuard::FooIsTrue => self.foo,
            SamekGuard::FooIsFalse => !self.foo,
        }
    }

    fn action(&mut self, _source: SamekState, _event: Option<SamekEvent>, action: SamekAction) {
        self.actions.push(action);
        match action {
            SamekAction::SetFooTrue => self.foo = true,
            SamekAction::SetFooFalse => self.foo = false,
        }
    }
}

pub fn samek_machine() -> Machine<RecordingHooks> {
    Machine::new(samek_chart(), RecordingHooks::new())
}
