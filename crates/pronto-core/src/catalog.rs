//! # Catalog Model
//!
//! Canonical catalog entities and the per-request snapshot they are read
//! from.
//!
//! ## The Trust Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Why a Snapshot Exists                                │
//! │                                                                         │
//! │  Client cart ──► references ids ONLY (item, size, ingredient)           │
//! │                                                                         │
//! │  Catalog store ──► CatalogSnapshot ──► every price used in computation  │
//! │                                                                         │
//! │  A tampered cart can change WHAT is ordered, never what it COSTS.       │
//! │  Client-submitted prices are not even representable here.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! All entities are read-only inputs fetched once per request. The engine
//! never creates, mutates, or re-reads them mid-computation; two quotes
//! over the same snapshot are byte-identical.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// Entities
// =============================================================================

/// A sellable catalog item (menu entry).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Catalog row id (strictly positive).
    pub id: i64,

    /// Organization this item belongs to.
    #[ts(as = "String")]
    pub organization_id: Uuid,

    /// Display name, used in logs and receipts upstream.
    pub name: String,

    /// Regular price in cents.
    pub base_price_cents: i64,

    /// Promotional price in cents. When present it replaces the base price.
    pub discounted_price_cents: Option<i64>,

    /// Whether the item can currently be sold.
    pub is_available: bool,
}

impl CatalogItem {
    /// The price pricing starts from: the discounted price when one is set,
    /// otherwise the base price.
    #[inline]
    pub fn effective_base_price(&self) -> Money {
        Money::from_cents(self.discounted_price_cents.unwrap_or(self.base_price_cents))
    }
}

/// A size option (e.g. small/medium/family).
///
/// Sizing is multiplier-based by default; a [`SizePriceOverride`] for an
/// (item, size) pair replaces the multiplier path entirely.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeOption {
    pub id: i64,

    #[ts(as = "String")]
    pub organization_id: Uuid,

    pub name: String,

    /// Price scale factor, >= 0. 1.0 means no change.
    pub multiplier: f64,
}

/// A fixed price for a specific (item, size) pair.
///
/// Takes absolute precedence: when present, the item's base price AND the
/// size multiplier are both ignored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizePriceOverride {
    pub item_id: i64,
    pub size_id: i64,
    pub price_cents: i64,
}

/// An extra ingredient that can be added to a line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    pub id: i64,

    #[ts(as = "String")]
    pub organization_id: Uuid,

    pub name: String,

    /// Price per unit in cents when no per-size override applies.
    pub base_price_cents: i64,
}

/// A per-size price for an extra ingredient.
///
/// Example: extra mozzarella costs more on a family-size pizza.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientSizePrice {
    pub ingredient_id: i64,
    pub size_id: i64,
    pub price_cents: i64,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable, keyed view of the catalog for one quote request.
///
/// Built once from the batch lookups, then consulted by the price
/// calculator. Construction validates what the store should already
/// guarantee (non-negative prices, non-negative multipliers) so the pricing
/// code can assume well-formed data.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    items: HashMap<i64, CatalogItem>,
    sizes: HashMap<i64, SizeOption>,
    size_overrides: HashMap<(i64, i64), i64>,
    ingredients: HashMap<i64, Ingredient>,
    ingredient_size_prices: HashMap<(i64, i64), i64>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from fetched records.
    ///
    /// ## Errors
    /// Rejects negative prices and negative size multipliers. These would
    /// mean corrupt catalog data; refusing the whole request is safer than
    /// quoting from it.
    pub fn new(
        items: Vec<CatalogItem>,
        sizes: Vec<SizeOption>,
        size_overrides: Vec<SizePriceOverride>,
        ingredients: Vec<Ingredient>,
        ingredient_size_prices: Vec<IngredientSizePrice>,
    ) -> ValidationResult<Self> {
        for item in &items {
            if item.base_price_cents < 0 || item.discounted_price_cents.unwrap_or(0) < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "item price",
                    min: 0,
                    max: i64::MAX,
                });
            }
        }
        for size in &sizes {
            if !(size.multiplier >= 0.0) {
                return Err(ValidationError::OutOfRange {
                    field: "size multiplier",
                    min: 0,
                    max: i64::MAX,
                });
            }
        }
        for o in &size_overrides {
            if o.price_cents < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "size price override",
                    min: 0,
                    max: i64::MAX,
                });
            }
        }
        for ing in &ingredients {
            if ing.base_price_cents < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "ingredient price",
                    min: 0,
                    max: i64::MAX,
                });
            }
        }
        for p in &ingredient_size_prices {
            if p.price_cents < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "ingredient size price",
                    min: 0,
                    max: i64::MAX,
                });
            }
        }

        Ok(CatalogSnapshot {
            items: items.into_iter().map(|i| (i.id, i)).collect(),
            sizes: sizes.into_iter().map(|s| (s.id, s)).collect(),
            size_overrides: size_overrides
                .into_iter()
                .map(|o| ((o.item_id, o.size_id), o.price_cents))
                .collect(),
            ingredients: ingredients.into_iter().map(|i| (i.id, i)).collect(),
            ingredient_size_prices: ingredient_size_prices
                .into_iter()
                .map(|p| ((p.ingredient_id, p.size_id), p.price_cents))
                .collect(),
        })
    }

    /// Looks up an item by id.
    pub fn item(&self, id: i64) -> Option<&CatalogItem> {
        self.items.get(&id)
    }

    /// Looks up a size option by id.
    pub fn size(&self, id: i64) -> Option<&SizeOption> {
        self.sizes.get(&id)
    }

    /// Fixed price for an (item, size) pair, when one is configured.
    pub fn size_price_override(&self, item_id: i64, size_id: i64) -> Option<Money> {
        self.size_overrides
            .get(&(item_id, size_id))
            .map(|&c| Money::from_cents(c))
    }

    /// Looks up an ingredient by id.
    pub fn ingredient(&self, id: i64) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    /// Unit price for an extra ingredient on a line of the given size.
    ///
    /// The (ingredient, size) override wins when present; otherwise the
    /// ingredient's base price. `None` when the ingredient itself is
    /// unknown.
    pub fn ingredient_price(&self, ingredient_id: i64, size_id: Option<i64>) -> Option<Money> {
        let ingredient = self.ingredients.get(&ingredient_id)?;
        if let Some(size_id) = size_id {
            if let Some(&cents) = self.ingredient_size_prices.get(&(ingredient_id, size_id)) {
                return Some(Money::from_cents(cents));
            }
        }
        Some(Money::from_cents(ingredient.base_price_cents))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
