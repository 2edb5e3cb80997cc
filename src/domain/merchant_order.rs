//! Merchant fulfilment states. Independent of the customer's
//! [`OrderStatus`](crate::domain::order::OrderStatus); the two only meet
//! through a shared order number.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MerchantOrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("order is already {0}")]
    Terminal(MerchantOrderStatus),
    #[error("cannot move order from {from} to {to}")]
    NotAllowed {
        from: MerchantOrderStatus,
        to: MerchantOrderStatus,
    },
    #[error("unknown order status {0:?}")]
    Unknown(String),
}

impl MerchantOrderStatus {
    pub const INITIAL: MerchantOrderStatus = MerchantOrderStatus::Pending;

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MerchantOrderStatus::Delivered | MerchantOrderStatus::Cancelled
        )
    }

    /// Accept a pending order.
    pub fn accept(self) -> Result<Self, TransitionError> {
        self.transition_to(MerchantOrderStatus::Preparing)
    }

    /// Reject a pending order. Only pending orders can be cancelled.
    pub fn cancel(self) -> Result<Self, TransitionError> {
        self.transition_to(MerchantOrderStatus::Cancelled)
    }

    /// Next step on the happy path.
    pub fn advance(self) -> Result<Self, TransitionError> {
        match self {
            MerchantOrderStatus::Pending => Ok(MerchantOrderStatus::Preparing),
            MerchantOrderStatus::Preparing => Ok(MerchantOrderStatus::Ready),
            MerchantOrderStatus::Ready => Ok(MerchantOrderStatus::Delivered),
            terminal => Err(TransitionError::Terminal(terminal)),
        }
    }

    pub fn transition_to(self, to: MerchantOrderStatus) -> Result<Self, TransitionError> {
        use MerchantOrderStatus::*;

        if self.is_terminal() {
            return Err(TransitionError::Terminal(self));
        }
        match (self, to) {
            (Pending, Preparing) | (Pending, Cancelled) | (Preparing, Ready) | (Ready, Delivered) => {
                Ok(to)
            }
            (from, to) => Err(TransitionError::NotAllowed { from, to }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantOrderStatus::Pending => "pending",
            MerchantOrderStatus::Preparing => "preparing",
            MerchantOrderStatus::Ready => "ready",
            MerchantOrderStatus::Delivered => "delivered",
            MerchantOrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MerchantOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MerchantOrderStatus {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MerchantOrderStatus::Pending),
            "preparing" => Ok(MerchantOrderStatus::Preparing),
            "ready" => Ok(MerchantOrderStatus::Ready),
            "delivered" => Ok(MerchantOrderStatus::Delivered),
            "cancelled" => Ok(MerchantOrderStatus::Cancelled),
            other => Err(TransitionError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MerchantOrderStatus::*;
    use super::*;

    #[test]
    fn pending_forks_to_preparing_or_cancelled() {
        assert_eq!(Pending.accept(), Ok(Preparing));
        assert_eq!(Pending.cancel(), Ok(Cancelled));
    }

    #[test]
    fn cancel_only_from_pending() {
        for status in [Preparing, Ready] {
            assert_eq!(
                status.cancel(),
                Err(TransitionError::NotAllowed { from: status, to: Cancelled })
            );
        }
        assert_eq!(Delivered.cancel(), Err(TransitionError::Terminal(Delivered)));
    }

    #[test]
    fn no_skipping_or_going_back() {
        assert!(Pending.transition_to(Ready).is_err());
        assert!(Ready.transition_to(Preparing).is_err());
        assert_eq!(Preparing.advance(), Ok(Ready));
        assert_eq!(Ready.advance(), Ok(Delivered));
        assert!(Cancelled.advance().is_err());
    }

    #[test]
    fn round_trips_through_str() {
        assert_eq!("ready".parse::<MerchantOrderStatus>(), Ok(Ready));
        assert!("accepted".parse::<MerchantOrderStatus>().is_err());
    }
}
