//! Remedia core: AI response normalization and remedy checkout.
//!
//! Two cooperating components make up this crate:
//!
//! - [`normalizer`] converts free-text or semi-structured replies from an
//!   external generative-AI provider into fully-populated [`normalizer::Diagnosis`]
//!   and [`normalizer::TreatmentPlan`] records, with a deterministic text
//!   fallback when the reply cannot be parsed.
//! - [`shop`] holds the purchasable items derived from a diagnosis and drives
//!   the checkout flow (cart → shipping → payment → success) against a
//!   pluggable payment gateway.
//!
//! The crate authors no persistence and no UI. Identity, document storage and
//! the AI/payment providers are external collaborators reached through the
//! trait seams in [`normalizer::provider`] and [`shop::payment`].

pub mod config;
pub mod normalizer;
pub mod shop;
