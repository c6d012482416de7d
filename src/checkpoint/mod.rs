//! Checkpoint and resume support.
//!
//! A checkpoint is a self-contained snapshot of a machine: where it started,
//! where it is now, how it got there, and some bookkeeping. Checkpoints can be
//! written as JSON for humans or as compact bincode bytes.

use crate::core::{State, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Bookkeeping tracked alongside the machine state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineMetadata {
    /// When the machine was created
    pub created_at: DateTime<Utc>,

    /// When an operation was last applied
    pub updated_at: DateTime<Utc>,

    /// Invocations per operation name, rejected ones included
    pub operation_counts: HashMap<String, usize>,
}

impl Default for MachineMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            operation_counts: HashMap::new(),
        }
    }
}

impl MachineMetadata {
    /// Count one invocation of `operation` and bump `updated_at`.
    pub fn record_operation(&mut self, operation: &str) {
        *self
            .operation_counts
            .entry(operation.to_string())
            .or_insert(0) += 1;
        self.updated_at = Utc::now();
    }

    /// Total number of operations applied.
    pub fn total_operations(&self) -> usize {
        self.operation_counts.values().sum()
    }
}

/// Serializable snapshot of a state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State> {
    /// Checkpoint format version
    pub version: u32,

    /// Identifier of the machine the snapshot was taken from
    pub id: Uuid,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// State the machine was created in
    pub initial_state: S,

    /// State at snapshot time
    pub current_state: S,

    /// Every state change so far
    pub history: StateHistory<S>,

    pub metadata: MachineMetadata,
}

impl<S: State> Checkpoint<S> {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Serialize to bincode bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from bincode bytes, rejecting unknown format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateTransition;
    use crate::order::OrderState;

    fn sample() -> Checkpoint<OrderState> {
        let history = StateHistory::new().record(StateTransition {
            from: OrderState::PaymentPending,
            to: OrderState::BeingPrepared,
            operation: "verify-payment".to_string(),
            timestamp: Utc::now(),
        });
        let mut metadata = MachineMetadata::default();
        metadata.record_operation("verify-payment");

        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            initial_state: OrderState::PaymentPending,
            current_state: OrderState::BeingPrepared,
            history,
            metadata,
        }
    }

    #[test]
    fn json_preserves_checkpoint() {
        let checkpoint = sample();
        let json = checkpoint.to_json().unwrap();
        assert!(json.contains("\"BeingPrepared\""));

        let restored = Checkpoint::<OrderState>::from_json(&json).unwrap();
        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn bytes_preserve_checkpoint() {
        let checkpoint = sample();
        let bytes = checkpoint.to_bytes().unwrap();

        let restored = Checkpoint::<OrderState>::from_bytes(&bytes).unwrap();
        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut checkpoint = sample();
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let json = checkpoint.to_json().unwrap();

        let result = Checkpoint::<OrderState>::from_json(&json);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            Checkpoint::<OrderState>::from_json("{not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::<OrderState>::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn metadata_counts_operations() {
        let mut metadata = MachineMetadata::default();
        metadata.record_operation("ship");
        metadata.record_operation("ship");
        metadata.record_operation("cancel");

        assert_eq!(metadata.operation_counts.get("ship"), Some(&2));
        assert_eq!(metadata.total_operations(), 3);
        assert!(metadata.updated_at >= metadata.created_at);
    }
}
