//! Core State trait for state machine states.
//!
//! A state is a plain tag: it carries no data beyond which behavior to run,
//! so every method here is a pure inspection of the tag.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records
/// - `PartialEq`: states are compared when replaying history
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: states are stored in checkpoints
///
/// # Example
///
/// ```rust
/// use orderstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Open,
///     Closed,
///     Welded,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Welded => "Welded",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Welded)
///     }
/// }
///
/// assert_eq!(DoorState::Closed.name(), "Closed");
/// assert!(DoorState::Welded.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Display name of the state.
    ///
    /// This is an explicit mapping, never derived from type names at runtime.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Terminal states have no outgoing transitions under any operation.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
