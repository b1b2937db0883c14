//! # Price Calculator
//!
//! Resolves the authoritative unit price of a single cart line from the
//! catalog snapshot.
//!
//! ## Unit Price Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How a Line Gets Its Unit Price                          │
//! │                                                                         │
//! │  CatalogItem ──► discounted price? ──► else base price                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  size set? ──► (item, size) override? ──► override REPLACES base        │
//! │       │                 │                  (multiplier ignored)         │
//! │       │                 └─── else ──────► base × multiplier             │
//! │       ▼                                                                 │
//! │  extras: Σ (per-size override | ingredient base) × extra qty            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unit price = sized base + extras total                                 │
//! │                                                                         │
//! │  split line? each half priced as above, then blended:                   │
//! │     blended = mean(p1, p2) rounded UP to the nearest 0.5 unit           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Split Rounding Rule
//! `ceil(((p1 + p2) / 2) * 2) / 2` in currency units. One-directional on
//! purpose: blending must never round a half-and-half item below its fair
//! mean. Exact integer form used here: ceil the mean to a cent, then up to
//! the next multiple of 50 cents. Pending product sign-off as a business
//! rule, not a candidate for "fixing" to round-to-nearest.

use crate::cart::{CartLine, ExtraIngredient};
use crate::catalog::CatalogSnapshot;
use crate::error::{CatalogKind, CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Line Pricing
// =============================================================================

/// Computes the unit price for a cart line.
///
/// Split lines price each half independently and blend; everything else is
/// a single [`price_selection`] pass.
///
/// ## Errors
/// `ItemUnavailable` when the item, size, or any extra ingredient is
/// missing from the snapshot or flagged unavailable. The whole quote
/// aborts; lines are never silently dropped or partially priced.
pub fn price_for_line(line: &CartLine, catalog: &CatalogSnapshot) -> CoreResult<Money> {
    let primary = price_selection(line.item_id, line.size_id, &line.extras, catalog)?;

    match &line.split_with {
        None => Ok(primary),
        Some(half) => {
            let secondary = price_selection(half.item_id, half.size_id, &half.extras, catalog)?;
            Ok(blend_halves(primary, secondary))
        }
    }
}

/// Line total: unit price × quantity.
pub fn line_total(line: &CartLine, catalog: &CatalogSnapshot) -> CoreResult<Money> {
    Ok(price_for_line(line, catalog)?.multiply_quantity(line.quantity))
}

/// Prices one item selection (a plain line, or one half of a split).
///
/// ## Steps
/// 1. Item lookup, availability check
/// 2. Base = discounted price if present, else base price
/// 3. Size: (item, size) fixed price replaces base outright; otherwise
///    base × multiplier, rounded half-up to a cent
/// 4. Extras: per-size override else ingredient base, × extra quantity
pub fn price_selection(
    item_id: i64,
    size_id: Option<i64>,
    extras: &[ExtraIngredient],
    catalog: &CatalogSnapshot,
) -> CoreResult<Money> {
    let item = catalog
        .item(item_id)
        .filter(|i| i.is_available)
        .ok_or(CoreError::ItemUnavailable {
            kind: CatalogKind::Item,
            id: item_id,
        })?;

    let mut base = item.effective_base_price();

    if let Some(size_id) = size_id {
        let size = catalog.size(size_id).ok_or(CoreError::ItemUnavailable {
            kind: CatalogKind::Size,
            id: size_id,
        })?;

        base = match catalog.size_price_override(item_id, size_id) {
            // A configured fixed price wins outright; the multiplier is
            // ignored even when both are set.
            Some(fixed) => fixed,
            None => Money::from_cents_rounded(base.cents() as f64 * size.multiplier),
        };
    }

    let mut extras_total = Money::zero();
    for extra in extras {
        let each = catalog
            .ingredient_price(extra.ingredient_id, size_id)
            .ok_or(CoreError::ItemUnavailable {
                kind: CatalogKind::Ingredient,
                id: extra.ingredient_id,
            })?;
        extras_total += each.multiply_quantity(extra.quantity);
    }

    Ok(base + extras_total)
}

/// Blends the two half prices of a split line.
///
/// Mean of the halves, rounded up to the nearest half currency unit.
/// Ceiling the mean to a cent first is exact: the 50-cent round-up absorbs
/// the at-most-half-cent difference.
fn blend_halves(a: Money, b: Money) -> Money {
    let sum = a + b;
    let mean_ceil = Money::from_cents((sum.cents() + 1) / 2);
    mean_ceil.round_up_to_half_unit()
}

// =============================================================================
// Unit Tests
// =============================================================================
