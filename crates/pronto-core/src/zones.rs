//! # Delivery Zones
//!
//! Zone polygons and deterministic containment resolution.
//!
//! ## Overlap Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Which Zone Wins on Overlap?                            │
//! │                                                                         │
//! │        ┌───────────────┐                                                │
//! │        │ Zone A (prio 1)                                                │
//! │        │      ┌────────┼──────┐                                         │
//! │        │      │  ● drop-off   │                                         │
//! │        └──────┼────────┘      │                                         │
//! │               │ Zone B (prio 5)                                         │
//! │               └───────────────┘                                         │
//! │                                                                         │
//! │  Both contain the point → highest priority wins (B).                    │
//! │  Same priority → smallest id wins, so resolution is reproducible        │
//! │  regardless of fetch order.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::geo::{point_in_polygon, GeoPoint};

// =============================================================================
// Delivery Zone
// =============================================================================

/// A polygonal delivery area with an optional flat fee.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryZone {
    pub id: i64,

    #[ts(as = "String")]
    pub organization_id: Uuid,

    pub name: String,

    /// Ordered boundary, at least 3 vertices.
    pub polygon: Vec<GeoPoint>,

    /// Higher wins when zones overlap.
    pub priority: i32,

    pub is_active: bool,

    /// Flat delivery fee for drop-offs inside this zone. When unset the
    /// configured distance-based schedule applies instead.
    pub fixed_fee_cents: Option<i64>,
}

impl DeliveryZone {
    /// Validates the polygon shape. Called at snapshot load; a zone with a
    /// degenerate polygon is a data error, not a "no match".
    pub fn validate(&self) -> ValidationResult<()> {
        if self.polygon.len() < 3 {
            return Err(ValidationError::OutOfRange {
                field: "zone polygon vertices",
                min: 3,
                max: i64::MAX,
            });
        }
        if let Some(fee) = self.fixed_fee_cents {
            if fee < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "zone fee",
                    min: 0,
                    max: i64::MAX,
                });
            }
        }
        Ok(())
    }

    /// Whether the zone is active and contains the point.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.is_active && point_in_polygon(point, &self.polygon)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the zone for a drop-off coordinate.
///
/// Filters to active zones containing the point, then picks the highest
/// priority; ties break on the smallest zone id so two runs over the same
/// snapshot always agree. Returns `None` when no zone matches; callers
/// fall back to the distance-based fee schedule.
///
/// ## Example
/// ```rust
/// use pronto_core::geo::GeoPoint;
/// use pronto_core::zones::resolve_zone;
///
/// assert!(resolve_zone(GeoPoint::new(0.0, 0.0), &[]).is_none());
/// ```
pub fn resolve_zone(point: GeoPoint, zones: &[DeliveryZone]) -> Option<&DeliveryZone> {
    zones
        .iter()
        .filter(|z| z.contains(point))
        .min_by_key(|z| (std::cmp::Reverse(z.priority), z.id))
}

// =============================================================================
// Unit Tests
// =============================================================================
