//! Payment gateway seam.
//!
//! The core's contract with a processor is one charge call that settles
//! or rejects. Real integrations live behind [`PaymentGateway`]; the
//! bundled [`SimulatedGateway`] is demo scaffolding that always approves.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::types::Currency;

/// Gateway-level failures. Both variants carry a user-presentable reason.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),

    #[error("payment gateway unreachable: {0}")]
    GatewayUnreachable(String),
}

/// One charge, amounts in minor units (kobo/cents).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub amount_minor: u64,
    pub currency: Currency,
    pub reference: String,
    pub payer_email: String,
}

impl ChargeRequest {
    /// Fresh gateway reference, `ref_{millis}`.
    pub fn new_reference() -> String {
        format!("ref_{}", Utc::now().timestamp_millis())
    }
}

/// Proof of a settled charge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub id: Uuid,
    pub reference: String,
    pub amount_minor: u64,
    pub currency: Currency,
    pub paid_at: DateTime<Utc>,
}

/// An external payment processor: one charge in, settled or rejected out.
pub trait PaymentGateway {
    fn charge(&self, request: &ChargeRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// Always-approving gateway for demos and local development.
///
/// Production hosts must supply a real [`PaymentGateway`] — the checkout
/// state machine handles rejection explicitly and must be exercised
/// against a gateway that can actually fail.
#[derive(Debug, Default)]
pub struct SimulatedGateway;

impl PaymentGateway for SimulatedGateway {
    fn charge(&self, request: &ChargeRequest) -> Result<PaymentReceipt, PaymentError> {
        tracing::info!(
            reference = %request.reference,
            amount_minor = request.amount_minor,
            currency = request.currency.code(),
            "simulated gateway approved charge"
        );
        Ok(PaymentReceipt {
            id: Uuid::new_v4(),
            reference: request.reference.clone(),
            amount_minor: request.amount_minor,
            currency: request.currency,
            paid_at: Utc::now(),
        })
    }
}

/// Always-rejecting gateway for exercising the failure path.
#[derive(Debug)]
pub struct DecliningGateway {
    reason: String,
}

impl DecliningGateway {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl PaymentGateway for DecliningGateway {
    fn charge(&self, request: &ChargeRequest) -> Result<PaymentReceipt, PaymentError> {
        tracing::warn!(reference = %request.reference, "declining gateway rejected charge");
        Err(PaymentError::Declined(self.reason.clone()))
    }
}
