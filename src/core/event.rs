//! Core Event trait for discrete input symbols.

use std::fmt::Debug;

/// Trait for chart events.
///
/// Events are the discrete input symbols a machine consumes. Like states
/// they are closed enums passed by value; unlike states they carry no
/// position in the hierarchy, only a name.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Event;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum DoorEvent {
///     Push,
///     Pull,
/// }
///
/// impl Event for DoorEvent {
///     fn name(self) -> &'static str {
///         match self {
///             Self::Push => "Push",
///             Self::Pull => "Pull",
///         }
///     }
/// }
/// ```
///
/// The [`event_enum!`](crate::event_enum) macro generates a conforming
/// enum and impl from a variant list.
pub trait Event: Copy + PartialEq + Eq + Debug + Send + Sync + 'static {
    /// The event's name for display/logging.
    fn name(self) -> &'static str;
}
