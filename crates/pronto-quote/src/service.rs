//! # Quote Service
//!
//! The end-to-end quote flow: request in, priced response or `{error,
//! code}` out.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       QuoteService::quote()                             │
//! │                                                                         │
//! │  1. require organization context (no guessing, ever)                    │
//! │  2. validate the cart shape ── cheap, before any lookup                 │
//! │  3. SnapshotLoader: batch lookups → frozen QuoteSnapshot                │
//! │  4. pronto_core::quote_order() ── pure, synchronous                     │
//! │  5. wrap into QuoteResponse (major units + minor-unit amount)           │
//! │                                                                         │
//! │  Failures at 3 log full backend detail and surface a generic code.      │
//! │  Failures at 4 map per the error taxonomy. Nothing partial escapes.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, error, info};
use ts_rs::TS;

use pronto_core::checkout::quote_order;
use pronto_core::validation::validate_cart;
use pronto_core::CoreError;

use crate::error::ApiError;
use crate::lookup::{CatalogSource, DeliverySource};
use crate::request::QuoteRequest;
use crate::snapshot::SnapshotLoader;

// =============================================================================
// Response
// =============================================================================

/// A successful quote, ready for the payment collaborator.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Sum of line totals, major units.
    pub subtotal: f64,

    /// Resolved delivery fee, major units.
    pub delivery_fee: f64,

    /// subtotal + delivery fee, major units.
    pub total: f64,

    /// The integer amount the gateway charges, in minor units. This is the
    /// authoritative figure; the float fields above are display copies.
    pub minor_unit_amount: i64,

    /// ISO 4217 code, passed through from the request.
    pub currency: String,
}

// =============================================================================
// Service
// =============================================================================

/// Quote orchestration over a pair of lookup collaborators.
pub struct QuoteService<C, D> {
    catalog: C,
    delivery: D,
}

impl<C: CatalogSource, D: DeliverySource> QuoteService<C, D> {
    pub fn new(catalog: C, delivery: D) -> Self {
        QuoteService { catalog, delivery }
    }

    /// Prices a request end to end.
    ///
    /// ## Errors
    /// - `VALIDATION_ERROR` - missing organization id, malformed cart
    /// - `ITEM_UNAVAILABLE` - a referenced entity cannot be priced
    /// - `BELOW_MINIMUM_ORDER` - total under the configured floor
    /// - `LOOKUP_FAILED` - a collaborator fetch failed (detail logged)
    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, ApiError> {
        let Some(organization_id) = request.organization_id else {
            return Err(ApiError::missing_context("organizationId"));
        };

        debug!(
            %organization_id,
            lines = request.lines.len(),
            order_type = ?request.order_type,
            "quote requested"
        );

        // Shape validation before any lookup: an invalid cart must not
        // cost a round-trip to the store.
        let cart = request.cart();
        validate_cart(&cart).map_err(CoreError::from)?;

        let loader = SnapshotLoader::new(&self.catalog, &self.delivery);
        let snapshot = loader
            .load(organization_id, &cart)
            .await
            .map_err(|err| {
                error!(%organization_id, %err, "snapshot load failed");
                ApiError::from(err)
            })?;

        let breakdown = quote_order(
            &cart,
            request.order_type,
            request.coordinate(),
            &snapshot.order,
        )
        .map_err(|err| {
            debug!(%organization_id, %err, "quote rejected");
            ApiError::from(err)
        })?;

        info!(
            %organization_id,
            subtotal = breakdown.subtotal.cents(),
            delivery_fee = breakdown.delivery_fee.cents(),
            total = breakdown.total.cents(),
            fetched_at = %snapshot.fetched_at,
            "quote priced"
        );

        Ok(QuoteResponse {
            subtotal: breakdown.subtotal.major_units(),
            delivery_fee: breakdown.delivery_fee.major_units(),
            total: breakdown.total.major_units(),
            minor_unit_amount: breakdown.minor_unit_amount(),
            currency: request.currency.clone(),
        })
    }
}
