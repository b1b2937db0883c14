//! # Snapshot Assembly
//!
//! Collects everything one quote needs into an immutable snapshot.
//!
//! ## Why Snapshot First?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Snapshot-Then-Compute                                   │
//! │                                                                         │
//! │  t0  collect id sets from the cart (split halves included)              │
//! │  t1  batch-fetch items, sizes, overrides, ingredients, prices           │
//! │  t2  fetch zones, config, policy                                        │
//! │  t3  freeze into QuoteSnapshot ── engine runs against THIS only         │
//! │                                                                         │
//! │  A catalog edit at t2.5 changes the next quote, never this one:         │
//! │  no quote ever mixes old and new prices.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stored delivery configuration arrives as a loose JSON shape
//! ([`RawDeliveryConfig`]) and is parsed into the tagged [`FeeSchedule`]
//! HERE, at load time. Use-time code never looks at mode strings.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use pronto_core::cart::Cart;
use pronto_core::catalog::CatalogSnapshot;
use pronto_core::checkout::OrderSnapshot;
use pronto_core::error::ValidationError;
use pronto_core::fees::{DeliveryConfig, FeeSchedule, RadialTier};
use pronto_core::geo::GeoPoint;

use crate::lookup::{CatalogSource, DeliverySource, LookupError};

// =============================================================================
// Raw Configuration
// =============================================================================

/// One stored radial tier, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTier {
    pub max_km: f64,
    pub price_cents: i64,
}

/// The delivery configuration as the store keeps it: a mode string plus
/// every field any mode might use.
///
/// Parsed once per quote into a [`DeliveryConfig`] whose schedule can only
/// carry the data its mode needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDeliveryConfig {
    pub calculation_mode: String,
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub base_fee_cents: i64,
    #[serde(default)]
    pub free_delivery_threshold_cents: Option<i64>,
    #[serde(default)]
    pub per_km_rate_cents: Option<i64>,
    #[serde(default)]
    pub tiers: Vec<RawTier>,
    #[serde(default)]
    pub out_of_radius_cents: Option<i64>,
}

impl RawDeliveryConfig {
    /// Validates and converts the stored shape into the tagged config.
    ///
    /// Degrades rather than fails: an unrecognized mode or a mode missing
    /// its data becomes `Flat` (base fee), and malformed radial tiers are
    /// dropped. Each degradation is logged; none of them blocks an order.
    pub fn into_config(self) -> DeliveryConfig {
        let schedule = match self.calculation_mode.as_str() {
            "flat" => FeeSchedule::Flat,
            "per_distance" => match self.per_km_rate_cents {
                Some(rate) if rate >= 0 => FeeSchedule::PerDistance {
                    per_km_rate_cents: rate,
                },
                _ => {
                    warn!(
                        mode = %self.calculation_mode,
                        "per-distance config without a usable rate, using flat"
                    );
                    FeeSchedule::Flat
                }
            },
            "radial" => {
                let mut tiers = Vec::with_capacity(self.tiers.len());
                for tier in &self.tiers {
                    if tier.max_km.is_finite() && tier.max_km >= 0.0 && tier.price_cents >= 0 {
                        tiers.push(RadialTier {
                            max_km: tier.max_km,
                            price_cents: tier.price_cents,
                        });
                    } else {
                        warn!(max_km = tier.max_km, price_cents = tier.price_cents, "dropping malformed radial tier");
                    }
                }
                FeeSchedule::radial(tiers, self.out_of_radius_cents)
            }
            other => {
                warn!(mode = %other, "unrecognized calculation mode, using flat");
                FeeSchedule::Flat
            }
        };

        DeliveryConfig {
            origin: GeoPoint::new(self.origin_lat, self.origin_lon),
            base_fee_cents: self.base_fee_cents.max(0),
            free_delivery_threshold_cents: self.free_delivery_threshold_cents,
            schedule,
        }
    }
}

// =============================================================================
// Snapshot Error
// =============================================================================

/// Snapshot assembly failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The collaborator fetch itself failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The store returned data the engine refuses to price from
    /// (negative prices, degenerate zone polygons).
    #[error("corrupt store data: {0}")]
    CorruptData(#[from] ValidationError),
}

// =============================================================================
// Quote Snapshot
// =============================================================================

/// The frozen inputs for one quote.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    /// What the engine computes over.
    pub order: OrderSnapshot,

    /// When the batch lookups completed. Diagnostics only; the engine
    /// itself never reads a clock.
    pub fetched_at: DateTime<Utc>,
}

// =============================================================================
// Loader
// =============================================================================

/// Assembles a [`QuoteSnapshot`] from the collaborator sources.
pub struct SnapshotLoader<'a, C, D> {
    catalog: &'a C,
    delivery: &'a D,
}

impl<'a, C: CatalogSource, D: DeliverySource> SnapshotLoader<'a, C, D> {
    pub fn new(catalog: &'a C, delivery: &'a D) -> Self {
        SnapshotLoader { catalog, delivery }
    }

    /// Fetches everything the cart references, one batch per entity kind.
    pub async fn load(
        &self,
        organization_id: Uuid,
        cart: &Cart,
    ) -> Result<QuoteSnapshot, SnapshotError> {
        let (item_ids, size_ids, ingredient_ids) = referenced_ids(cart);
        debug!(
            items = item_ids.len(),
            sizes = size_ids.len(),
            ingredients = ingredient_ids.len(),
            "loading quote snapshot"
        );

        let items = self.catalog.items(organization_id, &item_ids).await?;
        let sizes = self.catalog.sizes(organization_id, &size_ids).await?;
        let size_overrides = self
            .catalog
            .size_price_overrides(organization_id, &item_ids)
            .await?;
        let ingredients = self
            .catalog
            .ingredients(organization_id, &ingredient_ids)
            .await?;
        let ingredient_size_prices = self
            .catalog
            .ingredient_size_prices(organization_id, &ingredient_ids)
            .await?;

        let zones = self.delivery.active_zones(organization_id).await?;
        for zone in &zones {
            zone.validate()?;
        }

        let config = self
            .delivery
            .delivery_config(organization_id)
            .await?
            .map(RawDeliveryConfig::into_config);
        if config.is_none() {
            // Degrades to the default fee downstream; worth a log line
            // because a live organization normally has one.
            warn!(%organization_id, "no delivery configuration found, default fee will apply");
        }

        let policy = self.delivery.order_policy(organization_id).await?;

        let catalog = CatalogSnapshot::new(
            items,
            sizes,
            size_overrides,
            ingredients,
            ingredient_size_prices,
        )?;

        Ok(QuoteSnapshot {
            order: OrderSnapshot {
                catalog,
                zones,
                config,
                policy,
            },
            fetched_at: Utc::now(),
        })
    }
}

/// The id sets a cart references, split halves included.
///
/// Sorted sets so the batch queries are deterministic for identical carts.
fn referenced_ids(cart: &Cart) -> (Vec<i64>, Vec<i64>, Vec<i64>) {
    let mut item_ids = BTreeSet::new();
    let mut size_ids = BTreeSet::new();
    let mut ingredient_ids = BTreeSet::new();

    for line in &cart.lines {
        item_ids.insert(line.item_id);
        if let Some(size_id) = line.size_id {
            size_ids.insert(size_id);
        }
        for extra in &line.extras {
            ingredient_ids.insert(extra.ingredient_id);
        }
        if let Some(half) = &line.split_with {
            item_ids.insert(half.item_id);
            if let Some(size_id) = half.size_id {
                size_ids.insert(size_id);
            }
            for extra in &half.extras {
                ingredient_ids.insert(extra.ingredient_id);
            }
        }
    }

    (
        item_ids.into_iter().collect(),
        size_ids.into_iter().collect(),
        ingredient_ids.into_iter().collect(),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pronto_core::cart::{CartLine, ExtraIngredient, HalfSelection};

    fn raw(mode: &str) -> RawDeliveryConfig {
        RawDeliveryConfig {
            calculation_mode: mode.into(),
            origin_lat: 45.0,
            origin_lon: 9.0,
            base_fee_cents: 300,
            free_delivery_threshold_cents: Some(5000),
            per_km_rate_cents: Some(120),
            tiers: vec![
                RawTier {
                    max_km: 5.0,
                    price_cents: 500,
                },
                RawTier {
                    max_km: 3.0,
                    price_cents: 200,
                },
                RawTier {
                    max_km: -1.0,
                    price_cents: 100,
                },
            ],
            out_of_radius_cents: Some(800),
        }
    }

    #[test]
    fn test_flat_mode() {
        let cfg = raw("flat").into_config();
        assert!(matches!(cfg.schedule, FeeSchedule::Flat));
        assert_eq!(cfg.base_fee_cents, 300);
        assert_eq!(cfg.origin, GeoPoint::new(45.0, 9.0));
    }

    #[test]
    fn test_unknown_mode_degrades_to_flat() {
        let cfg = raw("surge_pricing_v2").into_config();
        assert!(matches!(cfg.schedule, FeeSchedule::Flat));
    }

    #[test]
    fn test_per_distance_requires_rate() {
        let cfg = raw("per_distance").into_config();
        assert!(matches!(
            cfg.schedule,
            FeeSchedule::PerDistance {
                per_km_rate_cents: 120
            }
        ));

        let mut no_rate = raw("per_distance");
        no_rate.per_km_rate_cents = None;
        assert!(matches!(no_rate.into_config().schedule, FeeSchedule::Flat));
    }

    #[test]
    fn test_radial_tiers_sorted_and_filtered() {
        let cfg = raw("radial").into_config();
        let FeeSchedule::Radial {
            tiers,
            out_of_radius_cents,
        } = cfg.schedule
        else {
            panic!("expected radial schedule");
        };
        // the malformed (negative max_km) tier is gone, the rest ascend
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].price_cents, 200);
        assert_eq!(tiers[1].price_cents, 500);
        assert_eq!(out_of_radius_cents, Some(800));
    }

    #[test]
    fn test_referenced_ids_include_split_halves() {
        let cart = Cart::new(vec![CartLine {
            item_id: 7,
            quantity: 1,
            size_id: Some(2),
            extras: vec![ExtraIngredient {
                ingredient_id: 30,
                quantity: 1,
            }],
            split_with: Some(HalfSelection {
                item_id: 8,
                size_id: Some(3),
                extras: vec![ExtraIngredient {
                    ingredient_id: 31,
                    quantity: 2,
                }],
            }),
        }]);

        let (items, sizes, ingredients) = referenced_ids(&cart);
        assert_eq!(items, vec![7, 8]);
        assert_eq!(sizes, vec![2, 3]);
        assert_eq!(ingredients, vec![30, 31]);
    }
}
