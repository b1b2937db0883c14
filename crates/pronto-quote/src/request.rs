//! # Quote Request DTOs
//!
//! The JSON shape clients submit for authoritative pricing.
//!
//! ## Wire Example
//! ```json
//! {
//!   "organizationId": "7e6cf0e3-4a6e-4a0f-9c3e-0d6f2f9b2a11",
//!   "orderType": "delivery",
//!   "latitude": 45.4642,
//!   "longitude": 9.19,
//!   "currency": "EUR",
//!   "lines": [
//!     { "itemId": 12, "quantity": 2, "sizeId": 3,
//!       "extras": [{ "ingredientId": 7, "quantity": 1 }] },
//!     { "itemId": 12, "quantity": 1,
//!       "splitItemId": 15, "splitSizeId": 3 }
//!   ]
//! }
//! ```
//!
//! Note what is NOT here: prices. The request identifies things; the
//! catalog prices them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use pronto_core::cart::{Cart, CartLine, ExtraIngredient, HalfSelection, OrderType};
use pronto_core::geo::GeoPoint;

// =============================================================================
// Request Shape
// =============================================================================

/// An extra-ingredient selection on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteExtra {
    pub ingredient_id: i64,
    pub quantity: i64,
}

/// One submitted cart line.
///
/// The `split*` fields describe the second half of a two-half item; a line
/// is split exactly when `split_item_id` is present.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub item_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub size_id: Option<i64>,
    #[serde(default)]
    pub extras: Vec<QuoteExtra>,
    #[serde(default)]
    pub split_item_id: Option<i64>,
    #[serde(default)]
    pub split_size_id: Option<i64>,
    #[serde(default)]
    pub split_extras: Vec<QuoteExtra>,
}

/// A full quote request.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// The organization whose catalog prices this order. Deliberately
    /// optional in the wire shape so its absence produces a clean
    /// validation error instead of a deserialization failure; it is
    /// REQUIRED for quoting.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub organization_id: Option<Uuid>,

    pub order_type: OrderType,

    pub lines: Vec<QuoteLine>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// ISO 4217 code passed through to the payment collaborator.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

// =============================================================================
// Conversion to the Engine Shape
// =============================================================================

impl QuoteLine {
    fn to_cart_line(&self) -> CartLine {
        CartLine {
            item_id: self.item_id,
            quantity: self.quantity,
            size_id: self.size_id,
            extras: to_extras(&self.extras),
            split_with: self.split_item_id.map(|item_id| HalfSelection {
                item_id,
                size_id: self.split_size_id,
                extras: to_extras(&self.split_extras),
            }),
        }
    }
}

fn to_extras(extras: &[QuoteExtra]) -> Vec<ExtraIngredient> {
    extras
        .iter()
        .map(|e| ExtraIngredient {
            ingredient_id: e.ingredient_id,
            quantity: e.quantity,
        })
        .collect()
}

impl QuoteRequest {
    /// The engine-facing cart.
    pub fn cart(&self) -> Cart {
        Cart::new(self.lines.iter().map(QuoteLine::to_cart_line).collect())
    }

    /// The drop-off coordinate, present only when BOTH components are.
    ///
    /// A half-supplied coordinate is treated as none at all; fee
    /// resolution then uses the base fee rather than a garbage distance.
    pub fn coordinate(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_parses() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "organizationId": "00000000-0000-0000-0000-000000000001",
                "orderType": "pickup",
                "lines": [{ "itemId": 1, "quantity": 2 }]
            }"#,
        )
        .unwrap();

        assert_eq!(request.currency, "EUR");
        assert!(request.coordinate().is_none());

        let cart = request.cart();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].item_id, 1);
        assert!(cart.lines[0].extras.is_empty());
        assert!(cart.lines[0].split_with.is_none());
    }

    #[test]
    fn test_split_fields_map_to_half_selection() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "organizationId": "00000000-0000-0000-0000-000000000001",
                "orderType": "delivery",
                "lines": [{
                    "itemId": 1, "quantity": 1, "sizeId": 3,
                    "splitItemId": 2, "splitSizeId": 4,
                    "splitExtras": [{ "ingredientId": 9, "quantity": 1 }]
                }]
            }"#,
        )
        .unwrap();

        let cart = request.cart();
        let half = cart.lines[0].split_with.as_ref().unwrap();
        assert_eq!(half.item_id, 2);
        assert_eq!(half.size_id, Some(4));
        assert_eq!(half.extras.len(), 1);
    }

    #[test]
    fn test_missing_organization_is_parseable() {
        // parses fine; the service rejects it with a required-context error
        let request: QuoteRequest = serde_json::from_str(
            r#"{ "orderType": "pickup", "lines": [] }"#,
        )
        .unwrap();
        assert!(request.organization_id.is_none());
    }

    #[test]
    fn test_half_supplied_coordinate_is_ignored() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "organizationId": "00000000-0000-0000-0000-000000000001",
                "orderType": "delivery",
                "latitude": 45.0,
                "lines": [{ "itemId": 1, "quantity": 1 }]
            }"#,
        )
        .unwrap();
        assert!(request.coordinate().is_none());
    }
}
