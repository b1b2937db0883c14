//! # Lookup Collaborators
//!
//! Traits for the external catalog/zone/config store.
//!
//! ## The Collaborator Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   One Quote, Five Batch Queries                         │
//! │                                                                         │
//! │  Cart references ──► id sets ──► CatalogSource                          │
//! │                                  ├── items(org, ids)                    │
//! │                                  ├── sizes(org, ids)                    │
//! │                                  ├── size_price_overrides(org, items)   │
//! │                                  ├── ingredients(org, ids)              │
//! │                                  └── ingredient_size_prices(org, ids)   │
//! │                                                                         │
//! │  Fee inputs ───────────────────► DeliverySource                         │
//! │                                  ├── active_zones(org)                  │
//! │                                  ├── delivery_config(org)               │
//! │                                  └── order_policy(org)                  │
//! │                                                                         │
//! │  One logical batch query per entity kind; never per cart line.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is scoped by organization id. Implementations must treat
//! the scope as a hard filter: returning another organization's rows would
//! cross the tenant boundary.

use uuid::Uuid;

use pronto_core::catalog::{
    CatalogItem, Ingredient, IngredientSizePrice, SizeOption, SizePriceOverride,
};
use pronto_core::checkout::OrderPolicy;
use pronto_core::zones::DeliveryZone;

use crate::snapshot::RawDeliveryConfig;

use thiserror::Error;

// =============================================================================
// Lookup Error
// =============================================================================

/// A collaborator fetch failed.
///
/// Carries the backend detail for server-side logging. It never reaches
/// the wire; see the conversion in the error module.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{entity} query failed: {detail}")]
    QueryFailed { entity: &'static str, detail: String },
}

/// Convenience type alias for Results with LookupError.
pub type LookupResult<T> = Result<T, LookupError>;

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Batch read access to the catalog store.
///
/// Implementations fetch by id set and may return fewer records than ids
/// requested; a missing record surfaces later as `ItemUnavailable`, not as
/// a lookup failure.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn items(&self, organization_id: Uuid, ids: &[i64]) -> LookupResult<Vec<CatalogItem>>;

    async fn sizes(&self, organization_id: Uuid, ids: &[i64]) -> LookupResult<Vec<SizeOption>>;

    /// Fixed (item, size) prices for any of the given items.
    async fn size_price_overrides(
        &self,
        organization_id: Uuid,
        item_ids: &[i64],
    ) -> LookupResult<Vec<SizePriceOverride>>;

    async fn ingredients(&self, organization_id: Uuid, ids: &[i64])
        -> LookupResult<Vec<Ingredient>>;

    /// Per-size prices for any of the given ingredients.
    async fn ingredient_size_prices(
        &self,
        organization_id: Uuid,
        ingredient_ids: &[i64],
    ) -> LookupResult<Vec<IngredientSizePrice>>;
}

/// Read access to delivery zones and fee configuration.
#[allow(async_fn_in_trait)]
pub trait DeliverySource {
    /// Active zones only; inactive zones never influence a quote.
    async fn active_zones(&self, organization_id: Uuid) -> LookupResult<Vec<DeliveryZone>>;

    /// The organization's delivery configuration, if any exists.
    ///
    /// `Ok(None)` is a normal answer: fee resolution degrades to the
    /// default fee. Only a failed fetch is an error.
    async fn delivery_config(
        &self,
        organization_id: Uuid,
    ) -> LookupResult<Option<RawDeliveryConfig>>;

    async fn order_policy(&self, organization_id: Uuid) -> LookupResult<OrderPolicy>;
}
