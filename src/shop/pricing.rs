//! Pricing of auto-extracted cart items.
//!
//! A pluggable strategy instead of inline randomness, so tests (and any
//! host with a real price list) inject deterministic prices.

use rand::Rng;

use super::types::{ItemKind, Price};

/// Assigns a dual-currency price to an extracted item.
pub trait PricingStrategy {
    fn price_for(&self, kind: ItemKind, name: &str) -> Price;
}

/// Bounded pseudo-random pricing: medicines at ₦1000–5999 / $10–59,
/// foods at ₦500–2499 / $5–24.
#[derive(Debug, Default)]
pub struct RandomPricing;

impl PricingStrategy for RandomPricing {
    fn price_for(&self, kind: ItemKind, _name: &str) -> Price {
        let mut rng = rand::thread_rng();
        match kind {
            ItemKind::Medicine => Price::new(rng.gen_range(1000..6000), rng.gen_range(10..60)),
            ItemKind::Food => Price::new(rng.gen_range(500..2500), rng.gen_range(5..25)),
        }
    }
}

/// Fixed per-kind pricing table. Deterministic, used by tests.
#[derive(Debug, Clone, Copy)]
pub struct FlatPricing {
    pub medicine: Price,
    pub food: Price,
}

impl FlatPricing {
    pub fn new(medicine: Price, food: Price) -> Self {
        Self { medicine, food }
    }
}

impl Default for FlatPricing {
    fn default() -> Self {
        Self {
            medicine: Price::new(2000, 20),
            food: Price::new(800, 8),
        }
    }
}

impl PricingStrategy for FlatPricing {
    fn price_for(&self, kind: ItemKind, _name: &str) -> Price {
        match kind {
            ItemKind::Medicine => self.medicine,
            ItemKind::Food => self.food,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pricing_stays_in_the_documented_ranges() {
        let pricing = RandomPricing;
        for _ in 0..200 {
            let medicine = pricing.price_for(ItemKind::Medicine, "Ibuprofen");
            assert!((1000..6000).contains(&medicine.naira));
            assert!((10..60).contains(&medicine.dollar));

            let food = pricing.price_for(ItemKind::Food, "Ginger tea");
            assert!((500..2500).contains(&food.naira));
            assert!((5..25).contains(&food.dollar));
        }
    }

    #[test]
    fn flat_pricing_is_deterministic_per_kind() {
        let pricing = FlatPricing::new(Price::new(1500, 15), Price::new(600, 6));
        assert_eq!(pricing.price_for(ItemKind::Medicine, "A"), Price::new(1500, 15));
        assert_eq!(pricing.price_for(ItemKind::Medicine, "B"), Price::new(1500, 15));
        assert_eq!(pricing.price_for(ItemKind::Food, "C"), Price::new(600, 6));
    }
}
