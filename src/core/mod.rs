//! Core state machine vocabulary.
//!
//! This module contains the pieces that do not depend on any particular
//! machine:
//! - State tags via the `State` trait and the `state_enum!` macro
//! - Immutable history tracking
//!
//! Nothing in this module performs I/O.

mod history;
mod macros;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::State;
