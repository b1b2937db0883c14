//! # Geometry Engine
//!
//! Planar and great-circle primitives used by delivery zone resolution.
//!
//! ## Where Geometry Is Used
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Geometry in the Fee Pipeline                         │
//! │                                                                         │
//! │  Drop-off coordinate                                                    │
//! │       │                                                                 │
//! │       ├──► point_in_polygon() ──► zone containment ──► zone fixed fee   │
//! │       │                                                                 │
//! │       └──► haversine_distance_meters() ──► radial tiers / per-km fee    │
//! │                                                                         │
//! │  centroid() / polygon_area() / is_clockwise() / simplify() support      │
//! │  zone diagnostics and polygon hygiene, never billing directly.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Precision
//! Coordinates are plain f64 degrees. Containment treats the polygon
//! boundary as inclusive: a drop-off pin placed exactly on a zone border
//! belongs to the zone. On-edge detection uses a 1e-9 degree tolerance.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tolerance for on-edge detection in degrees.
///
/// 1e-9 degrees is roughly 0.1 mm at the equator, far below GPS noise.
/// A coordinate closer than this to a zone border counts as inside.
pub const EDGE_TOLERANCE: f64 = 1e-9;

/// Mean Earth radius in meters, used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// =============================================================================
// GeoPoint
// =============================================================================

/// A geographic coordinate (latitude/longitude in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }
}

// =============================================================================
// Containment
// =============================================================================

/// Tests whether a point lies inside a polygon (boundary inclusive).
///
/// ## Algorithm
/// Ray casting with an eastward ray:
/// 1. Polygons with fewer than 3 vertices contain nothing.
/// 2. A point matching a vertex within tolerance is inside.
/// 3. Horizontal edges cannot produce a valid ray crossing and are skipped
///    for counting, but a point lying on one is inside.
/// 4. For every other edge whose latitude span strictly brackets the
///    point's latitude, the edge longitude at that latitude is computed.
///    Within tolerance of the point's longitude the point is on the edge;
///    east of the point it counts as a crossing.
/// 5. Inside ⇔ odd crossing count.
///
/// ## Example
/// ```rust
/// use pronto_core::geo::{point_in_polygon, GeoPoint};
///
/// let square = [
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 2.0),
///     GeoPoint::new(2.0, 2.0),
///     GeoPoint::new(2.0, 0.0),
/// ];
/// assert!(point_in_polygon(GeoPoint::new(1.0, 1.0), &square));
/// assert!(!point_in_polygon(GeoPoint::new(3.0, 3.0), &square));
/// ```
pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut crossings = 0u32;

    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];

        // Exact vertex hit
        if (point.lat - a.lat).abs() <= EDGE_TOLERANCE && (point.lon - a.lon).abs() <= EDGE_TOLERANCE
        {
            return true;
        }

        if (a.lat - b.lat).abs() <= EDGE_TOLERANCE {
            // Horizontal edge: never a crossing, but the point may sit on it
            if (point.lat - a.lat).abs() <= EDGE_TOLERANCE
                && point.lon >= a.lon.min(b.lon) - EDGE_TOLERANCE
                && point.lon <= a.lon.max(b.lon) + EDGE_TOLERANCE
            {
                return true;
            }
            continue;
        }

        // Only edges whose latitude span strictly brackets the point can cross
        let (lat_min, lat_max) = if a.lat < b.lat {
            (a.lat, b.lat)
        } else {
            (b.lat, a.lat)
        };
        if point.lat <= lat_min || point.lat >= lat_max {
            continue;
        }

        // Longitude of the edge at the point's latitude
        let t = (point.lat - a.lat) / (b.lat - a.lat);
        let lon_at = a.lon + t * (b.lon - a.lon);

        if (lon_at - point.lon).abs() <= EDGE_TOLERANCE {
            return true;
        }
        if lon_at > point.lon {
            crossings += 1;
        }
    }

    crossings % 2 == 1
}

// =============================================================================
// Polygon Measures
// =============================================================================

/// Arithmetic mean of the vertex coordinates.
///
/// Not area-weighted: zone polygons are small and roughly convex, and the
/// centroid is only used as a display anchor and distance reference.
/// Defined as (0, 0) for an empty polygon.
pub fn centroid(polygon: &[GeoPoint]) -> GeoPoint {
    if polygon.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }
    let n = polygon.len() as f64;
    let (lat_sum, lon_sum) = polygon
        .iter()
        .fold((0.0, 0.0), |(la, lo), p| (la + p.lat, lo + p.lon));
    GeoPoint::new(lat_sum / n, lon_sum / n)
}

/// Absolute shoelace area of the polygon, in squared degrees.
///
/// Diagnostics and zone ordering only; no fee is ever derived from it.
pub fn polygon_area(polygon: &[GeoPoint]) -> f64 {
    signed_area(polygon).abs()
}

/// Shoelace signed area. Positive for one winding, negative for the other.
fn signed_area(polygon: &[GeoPoint]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        sum += a.lon * b.lat - b.lon * a.lat;
    }
    sum * 0.5
}

/// True when the polygon winds clockwise.
///
/// Uses the edge accumulator `Σ (Δlon)·(lat_i + lat_{i+1})`; a positive
/// sum means clockwise winding in lat/lon axes.
pub fn is_clockwise(polygon: &[GeoPoint]) -> bool {
    let n = polygon.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        sum += (b.lon - a.lon) * (a.lat + b.lat);
    }
    sum > 0.0
}

// =============================================================================
// Simplification
// =============================================================================

/// Drops near-collinear interior vertices.
///
/// A vertex is dropped when the cross-product magnitude of the vectors to
/// its neighbors is at most `tolerance`. The first and last vertices are
/// always retained, passes repeat until stable, and polygons already at
/// 3 or fewer vertices come back unchanged.
///
/// ## Example
/// ```rust
/// use pronto_core::geo::{simplify, GeoPoint};
///
/// let poly = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(1.0, 1.0), // collinear with neighbors
///     GeoPoint::new(2.0, 2.0),
///     GeoPoint::new(2.0, 0.0),
/// ];
/// assert_eq!(simplify(&poly, 1e-12).len(), 3);
/// ```
pub fn simplify(polygon: &[GeoPoint], tolerance: f64) -> Vec<GeoPoint> {
    let mut points: Vec<GeoPoint> = polygon.to_vec();
    if points.len() <= 3 {
        return points;
    }

    loop {
        let mut removed = false;
        let mut i = 1;
        while i + 1 < points.len() && points.len() > 3 {
            let prev = points[i - 1];
            let cur = points[i];
            let next = points[i + 1];
            let cross = (cur.lon - prev.lon) * (next.lat - cur.lat)
                - (cur.lat - prev.lat) * (next.lon - cur.lon);
            if cross.abs() <= tolerance {
                points.remove(i);
                removed = true;
            } else {
                i += 1;
            }
        }
        if !removed || points.len() <= 3 {
            return points;
        }
    }
}

// =============================================================================
// Distance
// =============================================================================

/// Great-circle distance between two coordinates, in meters.
///
/// Standard haversine formulation. Accurate to well under a meter at
/// city-delivery scales, which is orders of magnitude finer than any fee
/// tier boundary.
///
/// ## Example
/// ```rust
/// use pronto_core::geo::{haversine_distance_meters, GeoPoint};
///
/// // one degree of latitude is roughly 111.2 km
/// let a = GeoPoint::new(45.0, 9.0);
/// let b = GeoPoint::new(46.0, 9.0);
/// let d = haversine_distance_meters(a, b);
/// assert!((d - 111_195.0).abs() < 100.0);
/// ```
pub fn haversine_distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(2.0, 0.0),
        ]
    }

    #[test]
    fn test_point_inside_square() {
        assert!(point_in_polygon(GeoPoint::new(1.0, 1.0), &square()));
    }

    #[test]
    fn test_point_outside_square() {
        assert!(!point_in_polygon(GeoPoint::new(3.0, 3.0), &square()));
        assert!(!point_in_polygon(GeoPoint::new(-1.0, 1.0), &square()));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // exactly on a vertex
        assert!(point_in_polygon(GeoPoint::new(0.0, 0.0), &square()));
        // midpoint of the vertical edge (varying lat, constant lon)
        assert!(point_in_polygon(GeoPoint::new(1.0, 0.0), &square()));
        // midpoint of the horizontal edge (constant lat, varying lon)
        assert!(point_in_polygon(GeoPoint::new(0.0, 1.0), &square()));
    }

    #[test]
    fn test_degenerate_polygons_contain_nothing() {
        assert!(!point_in_polygon(GeoPoint::new(0.0, 0.0), &[]));
        assert!(!point_in_polygon(
            GeoPoint::new(0.0, 0.0),
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]
        ));
    }

    #[test]
    fn test_concave_polygon() {
        // L-shape: the notch around (1.5, 1.5) is outside
        let l_shape = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 1.0),
            GeoPoint::new(2.0, 0.0),
        ];
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.5), &l_shape));
        assert!(point_in_polygon(GeoPoint::new(1.5, 0.5), &l_shape));
        assert!(!point_in_polygon(GeoPoint::new(1.5, 1.5), &l_shape));
    }

    #[test]
    fn test_centroid() {
        let c = centroid(&square());
        assert!((c.lat - 1.0).abs() < 1e-12);
        assert!((c.lon - 1.0).abs() < 1e-12);

        assert_eq!(centroid(&[]), GeoPoint::new(0.0, 0.0));

        let single = [GeoPoint::new(4.5, -3.25)];
        assert_eq!(centroid(&single), single[0]);
    }

    #[test]
    fn test_polygon_area() {
        assert!((polygon_area(&square()) - 4.0).abs() < 1e-12);
        assert_eq!(polygon_area(&[GeoPoint::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_is_clockwise() {
        // square() walks lon up at low lat and back at high lat
        let ccw: Vec<GeoPoint> = square();
        let cw: Vec<GeoPoint> = ccw.iter().rev().copied().collect();
        assert_ne!(is_clockwise(&ccw), is_clockwise(&cw));
    }

    #[test]
    fn test_simplify_drops_collinear_vertex() {
        let poly = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0), // collinear interior vertex
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(2.0, 0.0),
        ];
        let simplified = simplify(&poly, 1e-12);
        assert_eq!(simplified.len(), 4);
        assert!(!simplified.contains(&GeoPoint::new(0.0, 1.0)));
    }

    #[test]
    fn test_simplify_is_noop_for_triangles() {
        let tri = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ];
        assert_eq!(simplify(&tri, 1.0), tri);
    }

    #[test]
    fn test_simplify_keeps_endpoints() {
        // every interior vertex is collinear; endpoints must survive
        let line = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(0.0, 3.0),
            GeoPoint::new(0.0, 4.0),
        ];
        let simplified = simplify(&line, 1e-12);
        assert_eq!(simplified.first(), line.first());
        assert_eq!(simplified.last(), line.last());
        assert_eq!(simplified.len(), 3);
    }

    #[test]
    fn test_haversine_zero_distance() {
        let p = GeoPoint::new(45.4642, 9.19); // Milan
        assert_eq!(haversine_distance_meters(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Milan Duomo to Monza, roughly 14.4 km
        let duomo = GeoPoint::new(45.4642, 9.1900);
        let monza = GeoPoint::new(45.5845, 9.2744);
        let d = haversine_distance_meters(duomo, monza);
        assert!(d > 13_000.0 && d < 16_000.0, "got {d}");
    }

    #[test]
    fn test_haversine_symmetry() {
        let a = GeoPoint::new(41.9, 12.5);
        let b = GeoPoint::new(45.5, 9.2);
        let ab = haversine_distance_meters(a, b);
        let ba = haversine_distance_meters(b, a);
        assert!((ab - ba).abs() < 1e-6);
    }
}
