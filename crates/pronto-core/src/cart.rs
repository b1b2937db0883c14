//! # Cart Model
//!
//! The client-submitted order shape, reduced to references.
//!
//! ## Design Note
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   What a Cart Line Carries                              │
//! │                                                                         │
//! │  CartLine                                                               │
//! │  ├── item_id ─────────────► which catalog item                          │
//! │  ├── quantity ────────────► how many (1..=100)                          │
//! │  ├── size_id? ────────────► which size option                           │
//! │  ├── extras[] ────────────► (ingredient_id, qty 1..=10) pairs           │
//! │  └── split_with? ─────────► second half of a two-half item              │
//! │                                                                         │
//! │  NO prices. A line identifies things; the catalog prices them.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Carts here are validated inputs, not interactive state: the dashboard
//! and mobile clients manage their own carts and submit the final shape for
//! authoritative pricing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Order Type
// =============================================================================

/// How the order reaches the customer. Only `Delivery` ever pays a fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Delivery,
    Pickup,
    DineIn,
}

// =============================================================================
// Cart Lines
// =============================================================================

/// An extra ingredient added to a line (or to one half of a split line).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtraIngredient {
    pub ingredient_id: i64,

    /// How many units of the extra, 1..=10.
    pub quantity: i64,
}

/// One half of a split line, priced independently from the primary half.
///
/// A "half and half" pizza references two catalog items; each half can have
/// its own size and extras. See the split blending rule in the price
/// calculator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HalfSelection {
    pub item_id: i64,
    pub size_id: Option<i64>,
    #[serde(default)]
    pub extras: Vec<ExtraIngredient>,
}

/// A single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item_id: i64,

    /// 1..=100.
    pub quantity: i64,

    pub size_id: Option<i64>,

    #[serde(default)]
    pub extras: Vec<ExtraIngredient>,

    /// Present when this line is split between two products.
    pub split_with: Option<HalfSelection>,
}

/// The whole submitted cart: an ordered, bounded sequence of lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a cart from lines.
    pub fn new(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_serde() {
        let json = serde_json::to_string(&OrderType::DineIn).unwrap();
        assert_eq!(json, "\"dine_in\"");
        let back: OrderType = serde_json::from_str("\"delivery\"").unwrap();
        assert_eq!(back, OrderType::Delivery);
    }

    #[test]
    fn test_cart_line_extras_default() {
        // extras may be omitted on the wire entirely
        let line: CartLine =
            serde_json::from_str(r#"{"item_id": 1, "quantity": 2, "size_id": null, "split_with": null}"#)
                .unwrap();
        assert!(line.extras.is_empty());
        assert!(line.split_with.is_none());
    }
}
