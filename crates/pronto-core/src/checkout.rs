//! # Order Total Assembler
//!
//! The top of the engine: cart in, authoritative charge out.
//!
//! ## Assembly Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      quote_order()                                      │
//! │                                                                         │
//! │  Cart ──► validate_cart() ──► any violation aborts, nothing priced      │
//! │   │                                                                     │
//! │   ▼                                                                     │
//! │  per line: price_for_line() × quantity ──► subtotal                     │
//! │   │                                                                     │
//! │   ▼                                                                     │
//! │  resolve_order_fee(zones, config) ──► delivery fee                      │
//! │   │                                                                     │
//! │   ▼                                                                     │
//! │  total = subtotal + fee ──► minimum-order floor check                   │
//! │   │                                                                     │
//! │   ▼                                                                     │
//! │  PriceBreakdown { subtotal, delivery_fee, total }                       │
//! │  └── minor_unit_amount() is what the payment collaborator charges       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is the ONLY place the minimum-order policy is enforced.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, OrderType};
use crate::catalog::CatalogSnapshot;
use crate::error::{CoreError, CoreResult};
use crate::fees::{resolve_order_fee, DeliveryConfig};
use crate::geo::GeoPoint;
use crate::money::Money;
use crate::pricing::line_total;
use crate::validation::validate_cart;
use crate::zones::DeliveryZone;

// =============================================================================
// Policy & Snapshot
// =============================================================================

/// Order-level policy knobs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderPolicy {
    /// Orders totalling under this amount are rejected. Zero disables the
    /// floor.
    pub minimum_order_cents: i64,
}

/// Everything the engine reads for one quote, fetched up front.
///
/// The engine never re-reads mid-computation: concurrent catalog edits
/// cannot produce a quote that mixes old and new prices.
#[derive(Debug, Clone, Default)]
pub struct OrderSnapshot {
    pub catalog: CatalogSnapshot,
    pub zones: Vec<DeliveryZone>,
    /// Absent configuration degrades the fee to a default; it never fails
    /// the order.
    pub config: Option<DeliveryConfig>,
    pub policy: OrderPolicy,
}

// =============================================================================
// Breakdown
// =============================================================================

/// The authoritative result of pricing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub delivery_fee: Money,
    /// Always `subtotal + delivery_fee`.
    pub total: Money,
}

impl PriceBreakdown {
    /// The integer minor-unit amount handed to the payment collaborator.
    /// Every component is already whole cents, so no rounding remains.
    #[inline]
    pub const fn minor_unit_amount(&self) -> i64 {
        self.total.cents()
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Prices a full order against an immutable snapshot.
///
/// ## Errors
/// - `Validation` for a malformed cart (empty, too many lines, bad bounds)
/// - `ItemUnavailable` when any referenced catalog entity cannot be priced
/// - `BelowMinimumOrder` when the total is under the configured floor
///
/// All errors abort the whole quote; no partial totals escape.
pub fn quote_order(
    cart: &Cart,
    order_type: OrderType,
    coordinate: Option<GeoPoint>,
    snapshot: &OrderSnapshot,
) -> CoreResult<PriceBreakdown> {
    validate_cart(cart)?;

    let mut subtotal = Money::zero();
    for line in &cart.lines {
        subtotal += line_total(line, &snapshot.catalog)?;
    }

    let delivery_fee = resolve_order_fee(
        order_type,
        subtotal,
        coordinate,
        &snapshot.zones,
        snapshot.config.as_ref(),
    );

    let total = subtotal + delivery_fee;

    let minimum = snapshot.policy.minimum_order_cents;
    if minimum > 0 && total.cents() < minimum {
        return Err(CoreError::BelowMinimumOrder {
            minimum_cents: minimum,
            total_cents: total.cents(),
        });
    }

    Ok(PriceBreakdown {
        subtotal,
        delivery_fee,
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::catalog::CatalogItem;
    use crate::fees::FeeSchedule;
    use uuid::Uuid;

    fn snapshot_with_items(items: Vec<(i64, i64)>) -> OrderSnapshot {
        let catalog = CatalogSnapshot::new(
            items
                .into_iter()
                .map(|(id, price)| CatalogItem {
                    id,
                    organization_id: Uuid::from_u128(1),
                    name: format!("Item {id}"),
                    base_price_cents: price,
                    discounted_price_cents: None,
                    is_available: true,
                })
                .collect(),
            vec![],
            vec![],
            vec![],
            vec![],
        )
        .unwrap();
        OrderSnapshot {
            catalog,
            ..Default::default()
        }
    }

    fn line(item_id: i64, quantity: i64) -> CartLine {
        CartLine {
            item_id,
            quantity,
            size_id: None,
            extras: vec![],
            split_with: None,
        }
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let snapshot = snapshot_with_items(vec![(1, 700), (2, 800)]);
        let cart = Cart::new(vec![line(1, 2), line(2, 3)]);

        let breakdown = quote_order(&cart, OrderType::Pickup, None, &snapshot).unwrap();
        assert_eq!(breakdown.subtotal.cents(), 2 * 700 + 3 * 800);
        assert!(breakdown.delivery_fee.is_zero());
        assert_eq!(breakdown.total, breakdown.subtotal + breakdown.delivery_fee);
        assert_eq!(breakdown.minor_unit_amount(), breakdown.total.cents());
    }

    #[test]
    fn test_delivery_adds_fee_to_total() {
        let mut snapshot = snapshot_with_items(vec![(1, 700)]);
        snapshot.config = Some(DeliveryConfig {
            origin: GeoPoint::new(0.0, 0.0),
            base_fee_cents: 250,
            free_delivery_threshold_cents: None,
            schedule: FeeSchedule::Flat,
        });
        let cart = Cart::new(vec![line(1, 1)]);

        let breakdown = quote_order(&cart, OrderType::Delivery, None, &snapshot).unwrap();
        assert_eq!(breakdown.delivery_fee.cents(), 250);
        assert_eq!(breakdown.total.cents(), 950);
    }

    #[test]
    fn test_free_delivery_threshold_boundary() {
        let mut snapshot = snapshot_with_items(vec![(1, 1000)]);
        snapshot.config = Some(DeliveryConfig {
            origin: GeoPoint::new(0.0, 0.0),
            base_fee_cents: 250,
            free_delivery_threshold_cents: Some(3000),
            schedule: FeeSchedule::Flat,
        });

        // 3 * 1000 = threshold exactly: free
        let cart = Cart::new(vec![line(1, 3)]);
        let breakdown = quote_order(&cart, OrderType::Delivery, None, &snapshot).unwrap();
        assert!(breakdown.delivery_fee.is_zero());

        // 2999 cents: pays the fee
        let mut snapshot_low = snapshot_with_items(vec![(1, 2999)]);
        snapshot_low.config = snapshot.config.clone();
        let cart = Cart::new(vec![line(1, 1)]);
        let breakdown = quote_order(&cart, OrderType::Delivery, None, &snapshot_low).unwrap();
        assert_eq!(breakdown.delivery_fee.cents(), 250);
    }

    #[test]
    fn test_minimum_order_floor() {
        let mut snapshot = snapshot_with_items(vec![(1, 700)]);
        snapshot.policy = OrderPolicy {
            minimum_order_cents: 1500,
        };
        let cart = Cart::new(vec![line(1, 1)]);

        let err = quote_order(&cart, OrderType::Pickup, None, &snapshot).unwrap_err();
        assert!(matches!(
            err,
            CoreError::BelowMinimumOrder {
                minimum_cents: 1500,
                total_cents: 700
            }
        ));

        // two of them clear the floor
        let cart = Cart::new(vec![line(1, 3)]);
        assert!(quote_order(&cart, OrderType::Pickup, None, &snapshot).is_ok());
    }

    #[test]
    fn test_invalid_cart_never_priced() {
        let snapshot = snapshot_with_items(vec![(1, 700)]);

        let err = quote_order(&Cart::default(), OrderType::Pickup, None, &snapshot).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let cart = Cart::new(vec![line(1, 0)]);
        let err = quote_order(&cart, OrderType::Pickup, None, &snapshot).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_unavailable_item_aborts_whole_order() {
        // one sellable item, one flagged unavailable
        let items = vec![
            CatalogItem {
                id: 1,
                organization_id: Uuid::from_u128(1),
                name: "Good".into(),
                base_price_cents: 700,
                discounted_price_cents: None,
                is_available: true,
            },
            CatalogItem {
                id: 2,
                organization_id: Uuid::from_u128(1),
                name: "Gone".into(),
                base_price_cents: 800,
                discounted_price_cents: None,
                is_available: false,
            },
        ];
        let snapshot = OrderSnapshot {
            catalog: CatalogSnapshot::new(items, vec![], vec![], vec![], vec![]).unwrap(),
            ..Default::default()
        };

        let cart = Cart::new(vec![line(1, 1), line(2, 1)]);
        let err = quote_order(&cart, OrderType::Pickup, None, &snapshot).unwrap_err();
        assert!(matches!(err, CoreError::ItemUnavailable { .. }));
    }

    #[test]
    fn test_quote_is_idempotent() {
        let mut snapshot = snapshot_with_items(vec![(1, 733), (2, 891)]);
        snapshot.config = Some(DeliveryConfig {
            origin: GeoPoint::new(45.0, 9.0),
            base_fee_cents: 275,
            free_delivery_threshold_cents: Some(10_000),
            schedule: FeeSchedule::PerDistance {
                per_km_rate_cents: 120,
            },
        });
        let cart = Cart::new(vec![line(1, 2), line(2, 1)]);
        let coordinate = Some(GeoPoint::new(45.03, 9.05));

        let first = quote_order(&cart, OrderType::Delivery, coordinate, &snapshot).unwrap();
        let second = quote_order(&cart, OrderType::Delivery, coordinate, &snapshot).unwrap();
        assert_eq!(first, second);
    }
}
