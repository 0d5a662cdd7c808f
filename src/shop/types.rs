use serde::{Deserialize, Serialize};

/// Minor units (kobo, cents) per major unit of either currency.
pub const MINOR_PER_MAJOR: u64 = 100;

/// Display and settlement currency for the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Naira,
    Dollar,
}

impl Currency {
    /// ISO 4217 code used on gateway requests.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Naira => "NGN",
            Self::Dollar => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Naira => "₦",
            Self::Dollar => "$",
        }
    }
}

/// Dual-currency price in whole major units. Both sides are always
/// populated so a currency toggle never hits a missing amount.
/// Integer arithmetic end to end — no float drift across updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub naira: u64,
    pub dollar: u64,
}

impl Price {
    pub fn new(naira: u64, dollar: u64) -> Self {
        Self { naira, dollar }
    }

    /// Amount in whole units of `currency`.
    pub fn amount_in(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Naira => self.naira,
            Currency::Dollar => self.dollar,
        }
    }

    /// Amount in minor units (kobo/cents) of `currency`.
    pub fn minor_units(&self, currency: Currency) -> u64 {
        self.amount_in(currency) * MINOR_PER_MAJOR
    }
}

/// What kind of purchasable an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Medicine,
    Food,
}

/// One purchasable entry of the cart.
///
/// `id` is unique within a cart; items auto-generated from a diagnosis
/// use `med-{i}` / `food-{i}`. `quantity` never persists at 0 — reaching
/// 0 removes the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCartItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub price: Price,
    pub quantity: u32,
    pub description: String,
}

/// Delivery details collected before payment. All fields required
/// non-empty at submission time; the data layer itself does not validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub receiver_name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl ShippingInfo {
    /// Display name of the first blank field, checked in form order.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        let fields: [(&str, &'static str); 5] = [
            (&self.receiver_name, "receiver name"),
            (&self.phone_number, "phone number"),
            (&self.address, "address"),
            (&self.city, "city"),
            (&self.state, "state"),
        ];
        fields
            .into_iter()
            .find(|(value, _)| value.trim().is_empty())
            .map(|(_, name)| name)
    }
}
