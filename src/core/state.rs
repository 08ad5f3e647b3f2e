//! Core State trait for chart states.
//!
//! Every state in a chart is a variant of a closed user enum implementing
//! this trait. The trait ties each variant to a dense index so the chart
//! can keep its topology in plain vectors.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for chart states.
///
/// States are small copyable values naming a position in the containment
/// hierarchy. Pseudostates (the pre-start and post-terminate positions) are
/// deliberately not part of this contract; they live in
/// [`Position`](crate::machine::Position) so a chart can never reference
/// them.
///
/// # Required Traits
///
/// - `Copy` + `Eq`: states are compared and passed by value throughout
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states must be serializable so hosts can
///   snapshot the machine position
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Closed,
///     Open,
/// }
///
/// impl State for DoorState {
///     const COUNT: usize = 2;
///
///     fn index(self) -> usize {
///         self as usize
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
/// ```
///
/// The [`state_enum!`](crate::state_enum) macro generates a conforming
/// enum and impl from a variant list.
pub trait State:
    Copy + PartialEq + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Number of states in the enum.
    ///
    /// `index` must map the variants onto `0..COUNT` with no gaps.
    const COUNT: usize;

    /// Dense index of this state, used to address chart tables.
    fn index(self) -> usize;

    /// The state's name for display/logging.
    fn name(self) -> &'static str;
}
