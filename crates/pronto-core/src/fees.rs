//! # Delivery Fee Resolver
//!
//! Turns a subtotal, order type, and drop-off coordinate into a fee.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fee Resolution Pipeline                              │
//! │                                                                         │
//! │  order type ≠ delivery ────────────────────────────► fee = 0            │
//! │        │                                                                │
//! │  subtotal ≥ free threshold (> 0) ──────────────────► fee = 0            │
//! │        │                                                                │
//! │  matching active zone with fixed fee ──────────────► zone fee           │
//! │        │                                                                │
//! │  no coordinate / no config ────────────────────────► base fee           │
//! │        │                                             (or hard default)  │
//! │        ▼                                                                │
//! │  schedule: Flat ──► base                                                │
//! │            PerDistance ──► base + km × rate                             │
//! │            Radial ──► first tier with max_km ≥ distance,                │
//! │                       else out-of-radius price (else base)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Graceful Degradation
//! A missing configuration degrades to [`crate::DEFAULT_DELIVERY_FEE_CENTS`]
//! instead of failing the order. This is deliberately asymmetric with
//! catalog lookups, which always fail closed: a wrong-but-bounded fee is a
//! recoverable support ticket, a made-up item price is not.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::OrderType;
use crate::geo::{haversine_distance_meters, GeoPoint};
use crate::money::Money;
use crate::zones::{resolve_zone, DeliveryZone};
use crate::DEFAULT_DELIVERY_FEE_CENTS;

// =============================================================================
// Configuration
// =============================================================================

/// One ring of a radial fee schedule.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RadialTier {
    /// Inclusive outer bound of the ring, in kilometers from the origin.
    pub max_km: f64,

    /// Fee charged inside this ring.
    pub price_cents: i64,
}

/// How the delivery fee is computed once the gates have passed.
///
/// Modeled as a tagged enum rather than a mode string plus loose fields so
/// a schedule can only ever carry the data its mode actually uses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FeeSchedule {
    /// Base fee for every delivery.
    Flat,

    /// Base fee plus a per-kilometer rate on the great-circle distance.
    PerDistance { per_km_rate_cents: i64 },

    /// Ascending distance rings, each with a fixed price.
    Radial {
        tiers: Vec<RadialTier>,
        /// Fee beyond the outermost ring; base fee when unset.
        out_of_radius_cents: Option<i64>,
    },
}

impl FeeSchedule {
    /// Builds a radial schedule, keeping tiers sorted ascending by
    /// `max_km` so tier lookup can stop at the first match.
    pub fn radial(mut tiers: Vec<RadialTier>, out_of_radius_cents: Option<i64>) -> Self {
        tiers.sort_by(|a, b| a.max_km.total_cmp(&b.max_km));
        FeeSchedule::Radial {
            tiers,
            out_of_radius_cents,
        }
    }
}

/// Delivery fee configuration for one organization.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryConfig {
    /// The business location distances are measured from.
    pub origin: GeoPoint,

    /// Fee used by `Flat`, as the floor of `PerDistance`, and as the final
    /// fallback everywhere else.
    pub base_fee_cents: i64,

    /// Orders at or above this subtotal deliver free. Ignored when unset
    /// or zero.
    pub free_delivery_threshold_cents: Option<i64>,

    pub schedule: FeeSchedule,
}

impl DeliveryConfig {
    fn base_fee(&self) -> Money {
        Money::from_cents(self.base_fee_cents)
    }

    fn threshold_reached(&self, subtotal: Money) -> bool {
        match self.free_delivery_threshold_cents {
            // threshold is inclusive: a subtotal exactly on it delivers free
            Some(threshold) if threshold > 0 => subtotal.cents() >= threshold,
            _ => false,
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the fee from the configured schedule alone.
///
/// Zone lookups happen a level above in [`resolve_order_fee`]; this
/// function is the pure distance/mode arithmetic.
///
/// ## Example
/// ```rust
/// use pronto_core::cart::OrderType;
/// use pronto_core::fees::resolve_fee;
/// use pronto_core::money::Money;
///
/// // non-delivery orders never pay a fee, config or not
/// let fee = resolve_fee(OrderType::Pickup, Money::from_cents(500), None, None);
/// assert!(fee.is_zero());
/// ```
pub fn resolve_fee(
    order_type: OrderType,
    subtotal: Money,
    coordinate: Option<GeoPoint>,
    config: Option<&DeliveryConfig>,
) -> Money {
    if order_type != OrderType::Delivery {
        return Money::zero();
    }

    let Some(config) = config else {
        // No configuration at all: degrade to the hard default rather than
        // failing the order. Item pricing never does this.
        return Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS);
    };

    if config.threshold_reached(subtotal) {
        return Money::zero();
    }

    let Some(coordinate) = coordinate else {
        return config.base_fee();
    };

    let distance_km = haversine_distance_meters(config.origin, coordinate) / 1000.0;

    match &config.schedule {
        FeeSchedule::Flat => config.base_fee(),
        FeeSchedule::PerDistance { per_km_rate_cents } => {
            let variable = Money::from_cents_rounded(distance_km * *per_km_rate_cents as f64);
            config.base_fee() + variable
        }
        FeeSchedule::Radial {
            tiers,
            out_of_radius_cents,
        } => tiers
            .iter()
            .find(|tier| tier.max_km >= distance_km)
            .map(|tier| Money::from_cents(tier.price_cents))
            .unwrap_or_else(|| {
                out_of_radius_cents
                    .map(Money::from_cents)
                    .unwrap_or_else(|| config.base_fee())
            }),
    }
}

/// Zone-aware fee resolution, the entry point used by checkout.
///
/// Applies the order-type and free-threshold gates first, so a subtotal
/// over the threshold delivers free no matter what any zone says. A
/// matching zone with a fixed fee then short-circuits the schedule;
/// everything else falls through to [`resolve_fee`].
pub fn resolve_order_fee(
    order_type: OrderType,
    subtotal: Money,
    coordinate: Option<GeoPoint>,
    zones: &[DeliveryZone],
    config: Option<&DeliveryConfig>,
) -> Money {
    if order_type != OrderType::Delivery {
        return Money::zero();
    }

    if let Some(config) = config {
        if config.threshold_reached(subtotal) {
            return Money::zero();
        }
    }

    if let Some(point) = coordinate {
        if let Some(zone) = resolve_zone(point, zones) {
            if let Some(fee) = zone.fixed_fee_cents {
                return Money::from_cents(fee);
            }
        }
    }

    resolve_fee(order_type, subtotal, coordinate, config)
}

// =============================================================================
// Unit Tests
// =============================================================================
