//! Order states and the operations that drive them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

crate::state_enum! {
    /// Lifecycle state of an order.
    ///
    /// Orders start in `PaymentPending`. `Cancelled` and `Shipped` are
    /// terminal.
    #[derive(Copy, Eq, Hash, Default)]
    pub enum OrderState {
        #[default]
        PaymentPending,
        Cancelled,
        BeingPrepared,
        Shipped,
    }
    final: [Cancelled, Shipped]
}

/// An operation a caller can invoke on an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderOperation {
    Cancel,
    VerifyPayment,
    Ship,
}

impl OrderOperation {
    pub const ALL: &'static [OrderOperation] = &[Self::Cancel, Self::VerifyPayment, Self::Ship];

    /// Canonical name, also used in history records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::VerifyPayment => "verify-payment",
            Self::Ship => "ship",
        }
    }
}

impl fmt::Display for OrderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text that does not name an [`OrderOperation`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown order operation '{0}' (expected cancel, verify-payment or ship)")]
pub struct ParseOperationError(pub String);

impl FromStr for OrderOperation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cancel" => Ok(Self::Cancel),
            "verify-payment" | "verify_payment" | "verifypayment" | "verify" => {
                Ok(Self::VerifyPayment)
            }
            "ship" => Ok(Self::Ship),
            _ => Err(ParseOperationError(s.to_string())),
        }
    }
}
