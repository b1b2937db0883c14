//! # API Error Type
//!
//! The structured `{error, code}` object callers receive.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pronto                                 │
//! │                                                                         │
//! │  Caller                       Quote Layer                               │
//! │  ──────                       ───────────                               │
//! │                                                                         │
//! │  POST quote request                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Lookup failed? ── LookupError ──────────┐ (detail logged,       │  │
//! │  │         │                                │  never sent)          │  │
//! │  │         ▼                                ▼                        │  │
//! │  │  Pricing failed? ── CoreError ───────► ApiError ────────────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "ITEM_UNAVAILABLE",                                          │
//! │    "message": "an item in the cart is no longer available" }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Leakage Policy
//! Catalog ids and backend error text stay server-side. The message field
//! carries only what the customer may see; everything else goes to the
//! structured log at the point of failure.

use serde::Serialize;
use ts_rs::TS;

use pronto_core::CoreError;

use crate::lookup::LookupError;
use crate::snapshot::SnapshotError;

// =============================================================================
// API Error
// =============================================================================

/// API error returned to the caller.
///
/// ## Serialization
/// ```json
/// {
///   "code": "BELOW_MINIMUM_ORDER",
///   "message": "order total is below the minimum of 15.00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message safe to display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed cart shape, out-of-range quantities, missing scoping key
    ValidationError,

    /// A referenced product, size, or ingredient cannot be sold right now
    ItemUnavailable,

    /// Computed total is under the organization's minimum order amount
    BelowMinimumOrder,

    /// No delivery configuration exists. The quote path never returns this
    /// (it degrades to the default fee instead); configuration management
    /// endpoints share this enum and do.
    ConfigurationMissing,

    /// Catalog/zone lookup itself failed
    LookupFailed,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// A required-context validation failure (e.g. missing organization id).
    ///
    /// A missing scoping key is an error, never an invitation to guess:
    /// quoting against "any active organization" would price one tenant's
    /// cart from another tenant's catalog.
    pub fn missing_context(field: &str) -> Self {
        ApiError::new(ErrorCode::ValidationError, format!("{field} is required"))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => ApiError::new(ErrorCode::ValidationError, v.to_string()),

            // The internal error knows which id failed; the caller only
            // learns that something in the cart is gone.
            CoreError::ItemUnavailable { .. } => ApiError::new(
                ErrorCode::ItemUnavailable,
                "an item in the cart is no longer available",
            ),

            CoreError::BelowMinimumOrder { minimum_cents, .. } => ApiError::new(
                ErrorCode::BelowMinimumOrder,
                format!(
                    "order total is below the minimum of {}",
                    pronto_core::Money::from_cents(minimum_cents)
                ),
            ),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(_: LookupError) -> Self {
        // Detail is logged where the failure happened; the wire gets a
        // generic failure.
        ApiError::new(ErrorCode::LookupFailed, "could not load order data")
    }
}

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Lookup(e) => e.into(),
            // Corrupt store data is an internal problem, not the caller's
            SnapshotError::CorruptData(_) => {
                ApiError::new(ErrorCode::LookupFailed, "could not load order data")
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pronto_core::error::CatalogKind;

    #[test]
    fn test_item_unavailable_hides_ids() {
        let core = CoreError::ItemUnavailable {
            kind: CatalogKind::Ingredient,
            id: 4711,
        };
        let api: ApiError = core.into();
        assert_eq!(api.code, ErrorCode::ItemUnavailable);
        assert!(!api.message.contains("4711"));
        assert!(!api.message.contains("ingredient"));
    }

    #[test]
    fn test_below_minimum_carries_floor_in_major_units() {
        let core = CoreError::BelowMinimumOrder {
            minimum_cents: 1500,
            total_cents: 700,
        };
        let api: ApiError = core.into();
        assert_eq!(api.code, ErrorCode::BelowMinimumOrder);
        assert!(api.message.contains("15.00"));
    }

    #[test]
    fn test_lookup_error_is_generic() {
        let lookup = LookupError::QueryFailed {
            entity: "menu_items",
            detail: "connection refused (10.0.0.3:5432)".into(),
        };
        let api: ApiError = lookup.into();
        assert_eq!(api.code, ErrorCode::LookupFailed);
        assert!(!api.message.contains("10.0.0.3"));
        assert!(!api.message.contains("menu_items"));
    }

    #[test]
    fn test_error_code_wire_format() {
        let json = serde_json::to_string(&ErrorCode::ItemUnavailable).unwrap();
        assert_eq!(json, "\"ITEM_UNAVAILABLE\"");
    }
}
