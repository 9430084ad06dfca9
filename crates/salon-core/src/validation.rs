//! # Validation Module
//!
//! Input validation for the salon booking store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (form widgets)                                  │
//! │  ├── Basic format checks, immediate user feedback                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field-level checks before any slice state is touched              │
//! │  └── Violations surface as ValidationError, wrapped into CoreError     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Slice invariants                                             │
//! │  ├── Unique email / unique id at registration                          │
//! │  └── Unique booking id at insert                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salon_core::validation::{validate_email, validate_persons};
//!
//! validate_email("amna@example.com").unwrap();
//! validate_persons(2).unwrap();
//! assert!(validate_persons(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Booking, CartItem, User};
use crate::{MAX_BOOKING_NAME_LEN, MAX_ITEM_QUANTITY, MAX_USERNAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_USERNAME_LEN`] characters
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::required("username"));
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain a single `@` with a dotted domain after it
///
/// This is a plausibility check, not RFC 5322; the email is only used as a
/// local identity key.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if parts.next().is_some() || local.is_empty() || !domain.contains('.') {
        return Err(ValidationError::invalid_format(
            "email",
            "expected name@domain.tld",
        ));
    }

    Ok(())
}

/// Validates a password.
///
/// Only presence is checked: passwords are opaque strings in this store and
/// credential hardening is out of scope.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }
    Ok(())
}

/// Validates the persons count of a booking.
pub fn validate_persons(persons: u32) -> ValidationResult<()> {
    if persons == 0 {
        return Err(ValidationError::MustBePositive {
            field: "persons".to_string(),
        });
    }
    Ok(())
}

/// Validates a cart item quantity.
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a user record ahead of registration.
pub fn validate_registration(user: &User) -> ValidationResult<()> {
    validate_username(&user.username)?;
    validate_email(&user.email)?;
    validate_password(&user.password)?;
    Ok(())
}

/// Validates a booking ahead of insertion.
///
/// ## Rules
/// - Contact name required, at most [`MAX_BOOKING_NAME_LEN`] characters
/// - Date string required (kept verbatim otherwise)
/// - Persons must be positive
pub fn validate_booking(booking: &Booking) -> ValidationResult<()> {
    let name = booking.name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.len() > MAX_BOOKING_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_BOOKING_NAME_LEN,
        });
    }

    if booking.date.trim().is_empty() {
        return Err(ValidationError::required("date"));
    }

    validate_persons(booking.persons)
}

/// Validates a cart line ahead of an add.
pub fn validate_cart_item(item: &CartItem) -> ValidationResult<()> {
    if item.name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    if item.price < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    validate_quantity(item.quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("amna").is_ok());
        assert!(validate_username("  ").is_err());
        assert!(validate_username(&"a".repeat(MAX_USERNAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("amna@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("nodot@example").is_err());
    }

    #[test]
    fn test_validate_persons() {
        assert!(validate_persons(1).is_ok());
        assert!(validate_persons(0).is_err());
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_cart_item_negative_price() {
        let item = CartItem {
            id: 1,
            name: "Facial Kit".to_string(),
            price: -5.0,
            image: "/kit.jpg".to_string(),
            quantity: 1,
        };
        assert!(validate_cart_item(&item).is_err());
    }
}
