//! The order lifecycle state machine.
//!
//! ```text
//!                 verify-payment              ship
//! PaymentPending ───────────────> BeingPrepared ─────> Shipped
//!       │                               │
//!       │ cancel                        │ cancel
//!       └──────────> Cancelled <────────┘
//! ```
//!
//! Every other (state, operation) pair leaves the order where it is and
//! reports why. `Cancelled` and `Shipped` are terminal.

mod machine;
mod shared;
mod state;
mod transition;

pub use machine::Order;
pub use shared::SharedOrder;
pub use state::{OrderOperation, OrderState, ParseOperationError};
pub use transition::{transition, Outcome};
