//! # Validation Module
//!
//! Whole-cart validation, run before any pricing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Client (mobile/dashboard)                                     │
//! │  ├── Basic format checks, immediate feedback                            │
//! │  └── UNTRUSTED - anything it says is re-checked here                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Cart shape (non-empty, line limit)                                 │
//! │  ├── Quantity bounds (lines and extras)                                 │
//! │  └── Identifier sanity (strictly positive ids)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog snapshot lookups                                      │
//! │  └── Existence/availability (ItemUnavailable, not ValidationError)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation is all-or-nothing: the first violation aborts the request and
//! no line is priced.

use crate::cart::{Cart, CartLine, ExtraIngredient};
use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_CART_LINES, MAX_EXTRA_QUANTITY, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates the whole cart: shape first, then every line.
///
/// ## Example
/// ```rust
/// use pronto_core::cart::{Cart, CartLine};
/// use pronto_core::validation::validate_cart;
///
/// let cart = Cart::new(vec![CartLine {
///     item_id: 1,
///     quantity: 2,
///     size_id: None,
///     extras: vec![],
///     split_with: None,
/// }]);
/// assert!(validate_cart(&cart).is_ok());
/// assert!(validate_cart(&Cart::default()).is_err());
/// ```
pub fn validate_cart(cart: &Cart) -> ValidationResult<()> {
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    if cart.lines.len() > MAX_CART_LINES {
        return Err(ValidationError::TooManyLines {
            max: MAX_CART_LINES,
        });
    }

    for line in &cart.lines {
        validate_line(line)?;
    }

    Ok(())
}

/// Validates a single cart line, including the second half of a split.
pub fn validate_line(line: &CartLine) -> ValidationResult<()> {
    validate_item_id(line.item_id)?;
    validate_quantity(line.quantity)?;

    if let Some(size_id) = line.size_id {
        validate_id(size_id, "size_id")?;
    }
    validate_extras(&line.extras)?;

    if let Some(half) = &line.split_with {
        validate_item_id(half.item_id)?;
        if let Some(size_id) = half.size_id {
            validate_id(size_id, "size_id")?;
        }
        validate_extras(&half.extras)?;
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be within [1, MAX_LINE_QUANTITY]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

/// Validates the extras list of a line or split half.
///
/// ## Rules
/// - Each extra quantity within [1, MAX_EXTRA_QUANTITY]
/// - Each ingredient id strictly positive
pub fn validate_extras(extras: &[ExtraIngredient]) -> ValidationResult<()> {
    for extra in extras {
        validate_id(extra.ingredient_id, "ingredient_id")?;
        if !(1..=MAX_EXTRA_QUANTITY).contains(&extra.quantity) {
            return Err(ValidationError::OutOfRange {
                field: "extra quantity",
                min: 1,
                max: MAX_EXTRA_QUANTITY,
            });
        }
    }
    Ok(())
}

/// Validates an item identifier.
pub fn validate_item_id(id: i64) -> ValidationResult<()> {
    validate_id(id, "item_id")
}

fn validate_id(id: i64, field: &'static str) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::InvalidIdentifier { field });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::HalfSelection;

    fn line(item_id: i64, quantity: i64) -> CartLine {
        CartLine {
            item_id,
            quantity,
            size_id: None,
            extras: vec![],
            split_with: None,
        }
    }

    #[test]
    fn test_empty_cart_rejected() {
        assert!(matches!(
            validate_cart(&Cart::default()),
            Err(ValidationError::EmptyCart)
        ));
    }

    #[test]
    fn test_too_many_lines_rejected() {
        let cart = Cart::new((0..51).map(|_| line(1, 1)).collect());
        assert!(matches!(
            validate_cart(&cart),
            Err(ValidationError::TooManyLines { max: 50 })
        ));

        let cart = Cart::new((0..50).map(|_| line(1, 1)).collect());
        assert!(validate_cart(&cart).is_ok());
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(101).is_err());
    }

    #[test]
    fn test_extra_bounds() {
        let ok = [ExtraIngredient {
            ingredient_id: 5,
            quantity: 10,
        }];
        assert!(validate_extras(&ok).is_ok());

        let too_many = [ExtraIngredient {
            ingredient_id: 5,
            quantity: 11,
        }];
        assert!(validate_extras(&too_many).is_err());

        let bad_id = [ExtraIngredient {
            ingredient_id: 0,
            quantity: 1,
        }];
        assert!(validate_extras(&bad_id).is_err());
    }

    #[test]
    fn test_non_positive_item_id_rejected() {
        assert!(validate_line(&line(0, 1)).is_err());
        assert!(validate_line(&line(-7, 1)).is_err());
        assert!(validate_line(&line(7, 1)).is_ok());
    }

    #[test]
    fn test_split_half_is_validated_too() {
        let mut l = line(1, 1);
        l.split_with = Some(HalfSelection {
            item_id: -2,
            size_id: None,
            extras: vec![],
        });
        assert!(validate_line(&l).is_err());

        let mut l = line(1, 1);
        l.split_with = Some(HalfSelection {
            item_id: 2,
            size_id: None,
            extras: vec![ExtraIngredient {
                ingredient_id: 3,
                quantity: 99,
            }],
        });
        assert!(validate_line(&l).is_err());
    }
}
