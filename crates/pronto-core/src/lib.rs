//! # pronto-core: Pure Pricing & Delivery-Fee Engine
//!
//! This crate is the **heart** of Pronto's checkout path. It recomputes the
//! authoritative price of a customer order from canonical catalog data and
//! resolves the delivery fee, independent of any price the client submits.
//! A tampered cart must never determine a charged amount.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pronto Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Clients (mobile app, dashboard)                    │   │
//! │  │        submit cart lines as ids + quantities, never prices      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pronto-quote                                 │   │
//! │  │    batch catalog/zone/config lookups → immutable snapshot       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pronto-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │   geo   │ │ pricing │ │  fees   │ │checkout │  │   │
//! │  │   │  Money  │ │ polygon │ │  lines  │ │ zones + │ │ totals  │  │   │
//! │  │   │  cents  │ │haversine│ │  splits │ │  tiers  │ │  floor  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCKS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                 {subtotal, deliveryFee, total} + minor units            │
//! │                        → payment collaborator                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cents money type (no floating point in totals)
//! - [`geo`] - Point-in-polygon, centroid, simplification, haversine
//! - [`catalog`] - Canonical catalog entities and the per-request snapshot
//! - [`cart`] - The client-submitted order shape (ids only)
//! - [`validation`] - Fail-fast cart validation
//! - [`pricing`] - Per-line unit prices, split-item blending
//! - [`zones`] - Delivery zone polygons and overlap resolution
//! - [`fees`] - Fee schedules (flat, per-distance, radial tiers)
//! - [`checkout`] - Order total assembly and the minimum-order floor
//! - [`error`] - Typed domain errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot in, same breakdown out - quoting is
//!    idempotent and safely parallel across requests
//! 2. **No I/O**: all catalog/zone/config data arrives as an immutable
//!    snapshot fetched by the caller before the engine runs
//! 3. **Integer Money**: monetary values are cents (i64); floats touch money
//!    only at the two fractional computations (multipliers, distances) and
//!    are rounded immediately
//! 4. **Fail Closed on Prices**: a missing catalog entity aborts the order;
//!    only the delivery fee has a graceful default
//!
//! ## Example Usage
//!
//! ```rust
//! use pronto_core::cart::{Cart, CartLine, OrderType};
//! use pronto_core::catalog::{CatalogItem, CatalogSnapshot};
//! use pronto_core::checkout::{quote_order, OrderSnapshot};
//! use uuid::Uuid;
//!
//! let catalog = CatalogSnapshot::new(
//!     vec![CatalogItem {
//!         id: 1,
//!         organization_id: Uuid::nil(),
//!         name: "Margherita".into(),
//!         base_price_cents: 700,
//!         discounted_price_cents: None,
//!         is_available: true,
//!     }],
//!     vec![], vec![], vec![], vec![],
//! ).unwrap();
//!
//! let snapshot = OrderSnapshot { catalog, ..Default::default() };
//! let cart = Cart::new(vec![CartLine {
//!     item_id: 1,
//!     quantity: 2,
//!     size_id: None,
//!     extras: vec![],
//!     split_with: None,
//! }]);
//!
//! let breakdown = quote_order(&cart, OrderType::Pickup, None, &snapshot).unwrap();
//! assert_eq!(breakdown.minor_unit_amount(), 1400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod fees;
pub mod geo;
pub mod money;
pub mod pricing;
pub mod validation;
pub mod zones;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pronto_core::Money` instead of
// `use pronto_core::money::Money`

pub use cart::{Cart, CartLine, OrderType};
pub use catalog::CatalogSnapshot;
pub use checkout::{quote_order, OrderSnapshot, PriceBreakdown};
pub use error::{CoreError, CoreResult, ValidationError};
pub use geo::GeoPoint;
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps one quote's batch lookups bounded.
pub const MAX_CART_LINES: usize = 50;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 200 instead of 2).
pub const MAX_LINE_QUANTITY: i64 = 100;

/// Maximum quantity of one extra ingredient on a line.
pub const MAX_EXTRA_QUANTITY: i64 = 10;

/// Delivery fee charged when no configuration exists for the organization.
///
/// Fee resolution degrades to this instead of failing the order; see the
/// fees module for the asymmetry with catalog lookups.
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 350;
