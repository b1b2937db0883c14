//! # Error Types
//!
//! Domain-specific error types for pronto-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pronto-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing-path failures                          │
//! │  └── ValidationError  - Cart shape/bounds violations                   │
//! │                                                                         │
//! │  pronto-quote errors (separate crate)                                  │
//! │  ├── LookupError      - Collaborator fetch failures                    │
//! │  └── ApiError         - What the caller sees ({error, code})           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//! Every pricing-path error aborts the whole computation. A cart is priced
//! completely or not at all; no partial totals ever reach the payment
//! collaborator. The one graceful-degradation path in the engine is a
//! missing delivery configuration, which falls back to a default fee and is
//! therefore NOT represented here as an error.

use thiserror::Error;

// =============================================================================
// Catalog Entry Kind
// =============================================================================

/// Which kind of catalog entity a failed lookup referred to.
///
/// Carried for server-side logging; the caller-facing message is always the
/// same generic "no longer available" text regardless of kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Item,
    Size,
    Ingredient,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Item => write!(f, "item"),
            CatalogKind::Size => write!(f, "size"),
            CatalogKind::Ingredient => write!(f, "ingredient"),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Pricing-path errors.
///
/// These abort the entire quote. They should be caught by the quote layer
/// and translated to user-facing `{error, code}` objects.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced catalog entity is missing from the snapshot or flagged
    /// unavailable.
    ///
    /// ## When This Occurs
    /// - Item id not in the snapshot (deleted, or belongs to another
    ///   organization)
    /// - Item exists but `is_available = false` (sold out, off-menu today)
    /// - Size or extra ingredient id unknown for this organization
    #[error("{kind} {id} is missing or unavailable")]
    ItemUnavailable { kind: CatalogKind, id: i64 },

    /// Computed total is under the configured minimum order amount.
    #[error("order total {total_cents} is below the minimum of {minimum_cents}")]
    BelowMinimumOrder { minimum_cents: i64, total_cents: i64 },

    /// Cart validation failed (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Cart shape and bounds violations.
///
/// Raised before any pricing begins; an invalid cart is never partially
/// priced.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The cart has no lines at all.
    #[error("cart must contain at least one line")]
    EmptyCart,

    /// The cart exceeds the line limit.
    #[error("cart cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: i64, max: i64 },

    /// An entity identifier must be strictly positive.
    #[error("{field} must be a positive identifier")]
    InvalidIdentifier { field: &'static str },

    /// A required scoping key or field is missing.
    #[error("{field} is required")]
    Required { field: &'static str },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemUnavailable {
            kind: CatalogKind::Ingredient,
            id: 42,
        };
        assert_eq!(err.to_string(), "ingredient 42 is missing or unavailable");

        let err = CoreError::BelowMinimumOrder {
            minimum_cents: 1500,
            total_cents: 900,
        };
        assert_eq!(
            err.to_string(),
            "order total 900 is below the minimum of 1500"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 100");

        assert_eq!(
            ValidationError::EmptyCart.to_string(),
            "cart must contain at least one line"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
