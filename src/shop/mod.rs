pub mod types;
pub mod cart;
pub mod pricing;
pub mod payment;
pub mod checkout;

pub use types::*;
pub use cart::*;
pub use pricing::*;
pub use payment::*;
pub use checkout::*;

use thiserror::Error;

/// Failures of the checkout state machine.
///
/// Cart mutation itself never fails — out-of-range quantities are
/// normalized, absent ids are no-ops. What can fail is a step transition
/// or the payment itself.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    /// Field-level shipping validation; `field` is the display name of
    /// the first incomplete field.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: checkout::CheckoutStep,
        to: checkout::CheckoutStep,
    },

    #[error("a payment is already being processed")]
    PaymentInProgress,

    #[error("payment failed: {0}")]
    Payment(#[from] payment::PaymentError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = CheckoutError::MissingField { field: "city" };
        assert_eq!(err.to_string(), "city is required");
    }

    #[test]
    fn payment_error_wraps_with_context() {
        let err: CheckoutError = payment::PaymentError::Declined("card expired".into()).into();
        assert_eq!(err.to_string(), "payment failed: payment declined: card expired");
    }
}
