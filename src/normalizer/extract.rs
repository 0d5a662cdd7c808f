//! Turns a diagnosis into purchasable cart items.

use crate::shop::pricing::PricingStrategy;
use crate::shop::types::{ItemKind, ShoppingCartItem};

use super::types::Diagnosis;

/// Map every medication and every food of `diagnosis` to exactly one cart
/// item with quantity 1. Ids are deterministic (`med-0`, `food-1`, …) and
/// unique within one diagnosis; prices come from the injected strategy.
pub fn extract_shopping_items(
    diagnosis: &Diagnosis,
    pricing: &dyn PricingStrategy,
) -> Vec<ShoppingCartItem> {
    let mut items =
        Vec::with_capacity(diagnosis.medications.len() + diagnosis.foods.len());

    for (index, name) in diagnosis.medications.iter().enumerate() {
        items.push(ShoppingCartItem {
            id: format!("med-{index}"),
            name: name.clone(),
            kind: ItemKind::Medicine,
            price: pricing.price_for(ItemKind::Medicine, name),
            quantity: 1,
            description: format!("Recommended medication: {name}"),
        });
    }

    for (index, name) in diagnosis.foods.iter().enumerate() {
        items.push(ShoppingCartItem {
            id: format!("food-{index}"),
            name: name.clone(),
            kind: ItemKind::Food,
            price: pricing.price_for(ItemKind::Food, name),
            quantity: 1,
            description: format!("Healing food: {name}"),
        });
    }

    items
}
