//! # In-Memory Backend
//!
//! A complete [`CatalogSource`] + [`DeliverySource`] implementation backed
//! by plain vectors.
//!
//! ## Uses
//! - integration tests that need a full store without a database
//! - the `quote` fixture binary (the whole backend deserializes from one
//!   JSON file)
//!
//! Scoping behaves like the real store: every read filters by organization
//! id, so a fixture can hold several organizations and cross-tenant reads
//! come back empty.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pronto_core::catalog::{
    CatalogItem, Ingredient, IngredientSizePrice, SizeOption, SizePriceOverride,
};
use pronto_core::checkout::OrderPolicy;
use pronto_core::zones::DeliveryZone;

use crate::lookup::{CatalogSource, DeliverySource, LookupResult};
use crate::snapshot::RawDeliveryConfig;

// =============================================================================
// Backend
// =============================================================================

/// Vector-backed store for fixtures and tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryBackend {
    pub items: Vec<CatalogItem>,
    pub sizes: Vec<SizeOption>,
    pub size_price_overrides: Vec<SizePriceOverride>,
    pub ingredients: Vec<Ingredient>,
    pub ingredient_size_prices: Vec<IngredientSizePrice>,
    pub zones: Vec<DeliveryZone>,
    pub config: Option<RawDeliveryConfig>,
    pub policy: OrderPolicy,
}

impl CatalogSource for InMemoryBackend {
    async fn items(&self, organization_id: Uuid, ids: &[i64]) -> LookupResult<Vec<CatalogItem>> {
        Ok(self
            .items
            .iter()
            .filter(|i| i.organization_id == organization_id && ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn sizes(&self, organization_id: Uuid, ids: &[i64]) -> LookupResult<Vec<SizeOption>> {
        Ok(self
            .sizes
            .iter()
            .filter(|s| s.organization_id == organization_id && ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn size_price_overrides(
        &self,
        organization_id: Uuid,
        item_ids: &[i64],
    ) -> LookupResult<Vec<SizePriceOverride>> {
        // override rows carry no org column of their own; they follow
        // their item, which was already scope-filtered
        let _ = organization_id;
        Ok(self
            .size_price_overrides
            .iter()
            .filter(|o| item_ids.contains(&o.item_id))
            .cloned()
            .collect())
    }

    async fn ingredients(
        &self,
        organization_id: Uuid,
        ids: &[i64],
    ) -> LookupResult<Vec<Ingredient>> {
        Ok(self
            .ingredients
            .iter()
            .filter(|i| i.organization_id == organization_id && ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn ingredient_size_prices(
        &self,
        organization_id: Uuid,
        ingredient_ids: &[i64],
    ) -> LookupResult<Vec<IngredientSizePrice>> {
        let _ = organization_id;
        Ok(self
            .ingredient_size_prices
            .iter()
            .filter(|p| ingredient_ids.contains(&p.ingredient_id))
            .cloned()
            .collect())
    }
}

impl DeliverySource for InMemoryBackend {
    async fn active_zones(&self, organization_id: Uuid) -> LookupResult<Vec<DeliveryZone>> {
        Ok(self
            .zones
            .iter()
            .filter(|z| z.organization_id == organization_id && z.is_active)
            .cloned()
            .collect())
    }

    async fn delivery_config(
        &self,
        _organization_id: Uuid,
    ) -> LookupResult<Option<RawDeliveryConfig>> {
        Ok(self.config.clone())
    }

    async fn order_policy(&self, _organization_id: Uuid) -> LookupResult<OrderPolicy> {
        Ok(self.policy)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_are_organization_scoped() {
        let org_a = Uuid::from_u128(1);
        let org_b = Uuid::from_u128(2);

        let backend = InMemoryBackend {
            items: vec![CatalogItem {
                id: 1,
                organization_id: org_a,
                name: "Margherita".into(),
                base_price_cents: 700,
                discounted_price_cents: None,
                is_available: true,
            }],
            ..Default::default()
        };

        assert_eq!(backend.items(org_a, &[1]).await.unwrap().len(), 1);
        // same id, other tenant: nothing
        assert!(backend.items(org_b, &[1]).await.unwrap().is_empty());
        // right tenant, unreferenced id: nothing
        assert!(backend.items(org_a, &[2]).await.unwrap().is_empty());
    }
}
