//! The checkout state machine: cart → shipping → payment → success.
//!
//! Payment rejection is an explicit state, not a swallowed log line: a
//! failed charge lands in `PaymentFailed` with a user-visible message and
//! the cart intact, and `retry_payment` returns to `Payment`.

use std::fmt;

use super::cart::Cart;
use super::payment::{ChargeRequest, PaymentGateway, PaymentReceipt};
use super::types::{Currency, ShippingInfo, ShoppingCartItem, MINOR_PER_MAJOR};
use super::CheckoutError;

/// Email attached to charges when the host supplies none.
pub const DEFAULT_PAYER_EMAIL: &str = "user@example.com";

/// Where the session currently is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Cart,
    Shipping,
    Payment,
    PaymentFailed,
    Success,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cart => write!(f, "cart"),
            Self::Shipping => write!(f, "shipping"),
            Self::Payment => write!(f, "payment"),
            Self::PaymentFailed => write!(f, "payment_failed"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// Ephemeral, single-owner shopping session.
///
/// Owns the cart and all checkout state; nothing else mutates either.
/// Not persisted — a session lives exactly as long as its owner holds it.
pub struct CheckoutSession {
    cart: Cart,
    step: CheckoutStep,
    currency: Currency,
    shipping: Option<ShippingInfo>,
    payer_email: String,
    processing: bool,
    payment_error: Option<String>,
    receipt: Option<PaymentReceipt>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::with_payer_email(DEFAULT_PAYER_EMAIL)
    }

    pub fn with_payer_email(payer_email: &str) -> Self {
        Self {
            cart: Cart::new(),
            step: CheckoutStep::Cart,
            currency: Currency::Naira,
            shipping: None,
            payer_email: payer_email.to_string(),
            processing: false,
            payment_error: None,
            receipt: None,
        }
    }

    // ── Read access ─────────────────────────────────────────

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Committed shipping info; retained after success for the
    /// confirmation view.
    pub fn shipping_info(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        self.receipt.as_ref()
    }

    /// User-visible reason of the last rejected charge.
    pub fn payment_error(&self) -> Option<&str> {
        self.payment_error.as_deref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    // ── Cart operations (valid in any step) ─────────────────

    pub fn add_to_cart(&mut self, item: ShoppingCartItem) {
        self.cart.add(item);
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        self.cart.remove(id);
    }

    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        self.cart.set_quantity(id, quantity);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn total_price(&self, currency: Currency) -> u64 {
        self.cart.total_price(currency)
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Unconditional overwrite of the shipping info. No validation at the
    /// data layer — completeness is enforced by the shipping → payment
    /// transition.
    pub fn set_shipping_info(&mut self, info: ShippingInfo) {
        self.shipping = Some(info);
    }

    // ── Step transitions ────────────────────────────────────

    fn expect_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                from: self.step,
                to,
            })
        }
    }

    /// Cart → Shipping. Rejected while the cart is empty.
    pub fn proceed_to_shipping(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Cart, CheckoutStep::Shipping)?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Shipping → Payment. All five fields must be non-empty after
    /// trimming; the committed info overwrites any earlier submission.
    pub fn submit_shipping(&mut self, info: ShippingInfo) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Shipping, CheckoutStep::Payment)?;
        if let Some(field) = info.first_missing_field() {
            return Err(CheckoutError::MissingField { field });
        }
        self.set_shipping_info(info);
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Shipping → Cart. Back navigation, discards nothing.
    pub fn back_to_cart(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Shipping, CheckoutStep::Cart)?;
        self.step = CheckoutStep::Cart;
        Ok(())
    }

    /// Payment (or PaymentFailed) → Shipping. Back navigation.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutError> {
        match self.step {
            CheckoutStep::Payment | CheckoutStep::PaymentFailed => {
                self.payment_error = None;
                self.step = CheckoutStep::Shipping;
                Ok(())
            }
            from => Err(CheckoutError::InvalidTransition {
                from,
                to: CheckoutStep::Shipping,
            }),
        }
    }

    /// Payment → Success on approval, → PaymentFailed on rejection.
    ///
    /// On approval the cart is cleared and the receipt stored; shipping
    /// info is retained for the confirmation view. On rejection the cart
    /// is untouched and the gateway's reason is kept for display. The
    /// `processing` flag keeps at most one charge in flight.
    pub fn submit_payment(
        &mut self,
        gateway: &dyn PaymentGateway,
    ) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Payment, CheckoutStep::Success)?;
        if self.processing {
            return Err(CheckoutError::PaymentInProgress);
        }

        let request = ChargeRequest {
            amount_minor: self.cart.total_price(self.currency) * MINOR_PER_MAJOR,
            currency: self.currency,
            reference: ChargeRequest::new_reference(),
            payer_email: self.payer_email.clone(),
        };

        self.processing = true;
        let outcome = gateway.charge(&request);
        self.processing = false;

        match outcome {
            Ok(receipt) => {
                tracing::info!(reference = %receipt.reference, "payment settled, order complete");
                self.cart.clear();
                self.payment_error = None;
                self.receipt = Some(receipt);
                self.step = CheckoutStep::Success;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "payment rejected");
                self.payment_error = Some(e.to_string());
                self.step = CheckoutStep::PaymentFailed;
                Err(CheckoutError::Payment(e))
            }
        }
    }

    /// PaymentFailed → Payment, clearing the stored rejection message.
    pub fn retry_payment(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::PaymentFailed, CheckoutStep::Payment)?;
        self.payment_error = None;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Success → Cart. Terminal reset when the confirmation is dismissed;
    /// shipping info stays available until the next submission.
    pub fn reset(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Success, CheckoutStep::Cart)?;
        self.step = CheckoutStep::Cart;
        Ok(())
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}
