//! The order context: current state, history and bookkeeping.

use super::state::{OrderOperation, OrderState};
use super::transition::{transition, Outcome};
use crate::checkpoint::{Checkpoint, CheckpointError, MachineMetadata, CHECKPOINT_VERSION};
use crate::core::{State, StateHistory, StateTransition};
use crate::sink::StatusSink;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// An order moving through its lifecycle.
///
/// The state is changed only by [`apply`](Self::apply) and the shorthands
/// built on it. Every call returns an [`Outcome`]; none of them fail.
///
/// # Example
///
/// ```rust
/// use orderstate::order::{Order, OrderState};
///
/// let mut order = Order::new();
/// order.verify_payment();
/// order.ship();
/// let outcome = order.cancel();
///
/// assert_eq!(order.state(), OrderState::Shipped);
/// assert!(outcome.message.contains("cannot cancel"));
/// assert_eq!(order.history().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Order {
    id: Uuid,
    state: OrderState,
    history: StateHistory<OrderState>,
    metadata: MachineMetadata,
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    /// Create an order awaiting payment.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: OrderState::PaymentPending,
            history: StateHistory::new(),
            metadata: MachineMetadata::default(),
        }
    }

    /// Get the order's identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get current state (pure)
    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Get the display name of the current state
    pub fn state_name(&self) -> &str {
        self.state.name()
    }

    /// Check if the order is in a terminal state (pure)
    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    /// Get state history (pure)
    pub fn history(&self) -> &StateHistory<OrderState> {
        &self.history
    }

    /// Get operation bookkeeping (pure)
    pub fn metadata(&self) -> &MachineMetadata {
        &self.metadata
    }

    /// Invoke an operation on the current state and commit the result.
    pub fn apply(&mut self, operation: OrderOperation) -> Outcome {
        let outcome = transition(self.state, operation);
        self.metadata.record_operation(operation.name());

        if outcome.transitioned() {
            tracing::debug!(
                order_id = %self.id,
                operation = operation.name(),
                from = outcome.from.name(),
                to = outcome.to.name(),
                "order state changed"
            );
            self.history = self.history.record(StateTransition {
                from: outcome.from,
                to: outcome.to,
                operation: operation.name().to_string(),
                timestamp: Utc::now(),
            });
            self.state = outcome.to;
        } else {
            tracing::debug!(
                order_id = %self.id,
                operation = operation.name(),
                state = outcome.from.name(),
                "operation rejected in current state"
            );
        }

        outcome
    }

    /// [`apply`](Self::apply), then write the outcome's message to `sink`.
    pub fn apply_with<K>(&mut self, operation: OrderOperation, sink: &mut K) -> Outcome
    where
        K: StatusSink + ?Sized,
    {
        let outcome = self.apply(operation);
        sink.emit(outcome.message);
        outcome
    }

    /// Apply [`OrderOperation::Cancel`]
    pub fn cancel(&mut self) -> Outcome {
        self.apply(OrderOperation::Cancel)
    }

    /// Apply [`OrderOperation::VerifyPayment`]
    pub fn verify_payment(&mut self) -> Outcome {
        self.apply(OrderOperation::VerifyPayment)
    }

    /// Apply [`OrderOperation::Ship`]
    pub fn ship(&mut self) -> Outcome {
        self.apply(OrderOperation::Ship)
    }

    /// Snapshot the order.
    pub fn checkpoint(&self) -> Checkpoint<OrderState> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: self.id,
            timestamp: Utc::now(),
            initial_state: OrderState::PaymentPending,
            current_state: self.state,
            history: self.history.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Rebuild an order from a checkpoint.
    ///
    /// The recorded history is replayed against the transition table; a
    /// checkpoint whose history or current state could not have been
    /// produced by a real order is rejected, as is one whose operation
    /// counts are lower than the operations its history records.
    pub fn resume(checkpoint: Checkpoint<OrderState>) -> Result<Self, CheckpointError> {
        checkpoint.check_version()?;

        if checkpoint.initial_state != OrderState::PaymentPending {
            return Err(CheckpointError::ValidationFailed(format!(
                "orders start in PaymentPending, checkpoint starts in {}",
                checkpoint.initial_state
            )));
        }

        let mut replayed = checkpoint.initial_state;
        let mut recorded_counts: HashMap<OrderOperation, usize> = HashMap::new();
        for (index, recorded) in checkpoint.history.transitions().iter().enumerate() {
            let operation: OrderOperation = recorded.operation.parse().map_err(|e| {
                CheckpointError::ValidationFailed(format!("transition {index}: {e}"))
            })?;

            if recorded.from != replayed {
                return Err(CheckpointError::ValidationFailed(format!(
                    "transition {index} starts in {} but the order was in {replayed}",
                    recorded.from
                )));
            }

            let expected = transition(replayed, operation);
            if !expected.transitioned() || expected.to != recorded.to {
                return Err(CheckpointError::ValidationFailed(format!(
                    "transition {index}: {operation} cannot move {replayed} to {}",
                    recorded.to
                )));
            }
            replayed = expected.to;
            *recorded_counts.entry(operation).or_insert(0) += 1;
        }

        if replayed != checkpoint.current_state {
            return Err(CheckpointError::ValidationFailed(format!(
                "history ends in {replayed} but current state is {}",
                checkpoint.current_state
            )));
        }

        for (operation, recorded) in recorded_counts {
            let counted = checkpoint
                .metadata
                .operation_counts
                .get(operation.name())
                .copied()
                .unwrap_or(0);
            if counted < recorded {
                return Err(CheckpointError::ValidationFailed(format!(
                    "metadata counts {counted} {operation} operations but history records {recorded}"
                )));
            }
        }

        tracing::info!(
            order_id = %checkpoint.id,
            state = replayed.name(),
            transitions = checkpoint.history.len(),
            "resumed order from checkpoint"
        );

        Ok(Self {
            id: checkpoint.id,
            state: replayed,
            history: checkpoint.history,
            metadata: checkpoint.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn new_order_awaits_payment() {
        let order = Order::new();
        assert_eq!(order.state(), OrderState::PaymentPending);
        assert_eq!(order.state_name(), "PaymentPending");
        assert!(!order.is_final());
        assert!(order.history().is_empty());
        assert_eq!(order.metadata().total_operations(), 0);
    }

    #[test]
    fn orders_get_distinct_ids() {
        assert_ne!(Order::new().id(), Order::new().id());
    }

    #[test]
    fn state_name_follows_state_changes() {
        let mut order = Order::new();
        order.verify_payment();
        assert_eq!(order.state_name(), "BeingPrepared");
        order.ship();
        assert_eq!(order.state_name(), "Shipped");
    }

    #[test]
    fn only_real_transitions_are_recorded() {
        let mut order = Order::new();
        order.ship();
        order.verify_payment();
        order.verify_payment();
        order.ship();
        order.cancel();

        let path: Vec<_> = order.history().get_path().into_iter().copied().collect();
        assert_eq!(
            path,
            vec![
                OrderState::PaymentPending,
                OrderState::BeingPrepared,
                OrderState::Shipped
            ]
        );
        assert_eq!(order.metadata().total_operations(), 5);
        assert_eq!(order.metadata().operation_counts.get("ship"), Some(&2));
    }

    #[test]
    fn apply_with_emits_message() {
        let mut order = Order::new();
        let mut sink = MemorySink::new();

        order.apply_with(OrderOperation::VerifyPayment, &mut sink);
        order.apply_with(OrderOperation::Ship, &mut sink);

        assert_eq!(
            sink.lines(),
            ["Payment verified! Shipping soon.", "Shipping your order now!"]
        );
    }

    #[test]
    fn apply_with_accepts_trait_objects() {
        let mut order = Order::new();
        let mut sink: Box<dyn StatusSink> = Box::new(MemorySink::new());
        let outcome = order.apply_with(OrderOperation::Cancel, sink.as_mut());
        assert_eq!(outcome.state(), OrderState::Cancelled);
    }

    #[test]
    fn checkpoint_resume_restores_order() {
        let mut order = Order::new();
        order.verify_payment();
        order.ship();

        let restored = Order::resume(order.checkpoint()).unwrap();
        assert_eq!(restored.id(), order.id());
        assert_eq!(restored.state(), OrderState::Shipped);
        assert_eq!(restored.history(), order.history());
        assert_eq!(restored.metadata(), order.metadata());
    }

    #[test]
    fn resume_rejects_mismatched_current_state() {
        let mut order = Order::new();
        order.verify_payment();

        let mut checkpoint = order.checkpoint();
        checkpoint.current_state = OrderState::Shipped;

        assert!(matches!(
            Order::resume(checkpoint),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn resume_rejects_impossible_history() {
        let mut checkpoint = Order::new().checkpoint();
        checkpoint.history = checkpoint.history.record(StateTransition {
            from: OrderState::PaymentPending,
            to: OrderState::Shipped,
            operation: "ship".to_string(),
            timestamp: Utc::now(),
        });
        checkpoint.current_state = OrderState::Shipped;

        let err = Order::resume(checkpoint).unwrap_err();
        assert!(err.to_string().contains("cannot move"));
    }

    #[test]
    fn resume_rejects_broken_chain() {
        let mut checkpoint = Order::new().checkpoint();
        checkpoint.history = checkpoint.history.record(StateTransition {
            from: OrderState::BeingPrepared,
            to: OrderState::Shipped,
            operation: "ship".to_string(),
            timestamp: Utc::now(),
        });
        checkpoint.current_state = OrderState::Shipped;

        let err = Order::resume(checkpoint).unwrap_err();
        assert!(err.to_string().contains("starts in BeingPrepared"));
    }

    #[test]
    fn resume_rejects_unknown_operation() {
        let mut checkpoint = Order::new().checkpoint();
        checkpoint.history = checkpoint.history.record(StateTransition {
            from: OrderState::PaymentPending,
            to: OrderState::Cancelled,
            operation: "refund".to_string(),
            timestamp: Utc::now(),
        });
        checkpoint.current_state = OrderState::Cancelled;

        let err = Order::resume(checkpoint).unwrap_err();
        assert!(err.to_string().contains("refund"));
    }

    #[test]
    fn resume_rejects_other_initial_state() {
        let mut checkpoint = Order::new().checkpoint();
        checkpoint.initial_state = OrderState::BeingPrepared;
        checkpoint.current_state = OrderState::BeingPrepared;

        assert!(matches!(
            Order::resume(checkpoint),
            Err(CheckpointError::ValidationFailed(_))
        ));
    }

    #[test]
    fn resume_rejects_undercounted_metadata() {
        let mut order = Order::new();
        order.verify_payment();
        order.ship();

        let mut checkpoint = order.checkpoint();
        checkpoint.metadata.operation_counts.clear();

        let err = Order::resume(checkpoint).unwrap_err();
        assert!(matches!(err, CheckpointError::ValidationFailed(_)));
        assert!(err.to_string().contains("metadata counts 0"));
    }

    #[test]
    fn resume_accepts_counts_that_include_rejected_operations() {
        let mut order = Order::new();
        order.ship();
        order.ship();
        order.cancel();

        let restored = Order::resume(order.checkpoint()).unwrap();
        assert_eq!(restored.metadata().total_operations(), 3);
        assert_eq!(restored.state(), OrderState::Cancelled);
    }

    #[test]
    fn resume_rejects_unsupported_version() {
        let mut checkpoint = Order::new().checkpoint();
        checkpoint.version = 0;

        assert!(matches!(
            Order::resume(checkpoint),
            Err(CheckpointError::UnsupportedVersion { found: 0, .. })
        ));
    }
}
