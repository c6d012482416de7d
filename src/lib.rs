//! Orderstate: an order lifecycle state machine
//!
//! An order is created with payment pending, and can then be cancelled, have
//! its payment verified, or be shipped. What each operation does depends only
//! on the current state, and the whole behavior is one pure, total function
//! from `(state, operation)` to an [`Outcome`](order::Outcome). Operations that
//! make no sense in the current state are not errors: they leave the state
//! alone and say why.
//!
//! # Core Concepts
//!
//! - **State**: tag enums implementing the `State` trait, usually via `state_enum!`
//! - **Transition**: the exhaustive `order::transition` table
//! - **History**: immutable record of the state changes an order went through
//! - **Sink**: where human-readable status lines go
//! - **Checkpoint**: JSON or binary snapshots that can be validated and resumed
//!
//! # Example
//!
//! ```rust
//! use orderstate::order::{Order, OrderOperation, OrderState};
//! use orderstate::sink::MemorySink;
//!
//! let mut order = Order::new();
//! let mut sink = MemorySink::new();
//!
//! order.apply_with(OrderOperation::VerifyPayment, &mut sink);
//! order.apply_with(OrderOperation::Ship, &mut sink);
//! order.apply_with(OrderOperation::Cancel, &mut sink);
//!
//! assert_eq!(order.state(), OrderState::Shipped);
//! assert_eq!(sink.last(), Some("You cannot cancel, already shipped!"));
//! ```

pub mod checkpoint;
pub mod core;
pub mod order;
pub mod sink;

// Re-export commonly used types
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{State, StateHistory, StateTransition};
pub use crate::order::{Order, OrderOperation, OrderState, Outcome, SharedOrder};
pub use crate::sink::{ConsoleSink, MemorySink, StatusSink, TracingSink};
