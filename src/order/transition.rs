//! The order transition table.

use super::state::{OrderOperation, OrderState};
use serde::Serialize;

/// Result of invoking an operation in some state.
///
/// Every operation yields an outcome; an operation that is not allowed in
/// the current state simply has `from == to` and a message explaining why.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub operation: OrderOperation,
    pub from: OrderState,
    pub to: OrderState,
    pub message: &'static str,
}

impl Outcome {
    /// The state after the operation.
    pub fn state(&self) -> OrderState {
        self.to
    }

    /// Whether the operation moved the order to another state.
    pub fn transitioned(&self) -> bool {
        self.from != self.to
    }
}

/// Pure transition function over every (state, operation) pair.
///
/// # Example
///
/// ```rust
/// use orderstate::order::{transition, OrderOperation, OrderState};
///
/// let outcome = transition(OrderState::PaymentPending, OrderOperation::Ship);
/// assert_eq!(outcome.state(), OrderState::PaymentPending);
/// assert!(!outcome.transitioned());
/// assert!(outcome.message.contains("pending"));
/// ```
pub fn transition(from: OrderState, operation: OrderOperation) -> Outcome {
    use OrderOperation::*;
    use OrderState::*;

    let (to, message) = match (from, operation) {
        (PaymentPending, Cancel) => (Cancelled, "Cancelling your unpaid order..."),
        (PaymentPending, VerifyPayment) => (BeingPrepared, "Payment verified! Shipping soon."),
        (PaymentPending, Ship) => (
            PaymentPending,
            "Cannot ship the order when payment is pending!",
        ),

        (Cancelled, Cancel) => (Cancelled, "Your order has already been cancelled."),
        (Cancelled, VerifyPayment) => (Cancelled, "Order cancelled, you cannot verify payment."),
        (Cancelled, Ship) => (Cancelled, "Order cannot ship, it was cancelled."),

        (BeingPrepared, Cancel) => (Cancelled, "Cancelling your order..."),
        (BeingPrepared, VerifyPayment) => (BeingPrepared, "Already verified your payment."),
        (BeingPrepared, Ship) => (Shipped, "Shipping your order now!"),

        (Shipped, Cancel) => (Shipped, "You cannot cancel, already shipped!"),
        (Shipped, VerifyPayment) => (Shipped, "You cannot verify payment, already shipped!"),
        (Shipped, Ship) => (Shipped, "You cannot ship it again, already shipped!"),
    };

    Outcome {
        operation,
        from,
        to,
        message,
    }
}
