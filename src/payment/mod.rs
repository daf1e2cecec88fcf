//! Payment gateway seam
//!
//! Buys settle through a gateway with a single capability:
//! `charge(method, amount)`. The interactive console gateway is a mock
//! with no real integration; tests substitute a recording gateway.

mod console;

pub use console::ConsoleGateway;

use anyhow::Result;
use rust_decimal::Decimal;

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Upi,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::CreditCard => write!(f, "Credit Card"),
            PaymentMethod::DebitCard => write!(f, "Debit Card"),
            PaymentMethod::Upi => write!(f, "UPI"),
        }
    }
}

/// Result of a charge attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Paid,
    Declined,
}

/// Capability required from any payment backend
pub trait PaymentGateway {
    fn charge(&mut self, method: PaymentMethod, amount: Decimal) -> Result<PaymentOutcome>;
}
