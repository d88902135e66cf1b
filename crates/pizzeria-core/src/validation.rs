//! # Validation Module
//!
//! Input validation for registration, profile updates and cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms (Ionic)                                        │
//! │  ├── Basic format checks, immediate feedback                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any storage call)                         │
//! │  ├── Business rule validation                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage backend                                               │
//! │  └── UNIQUE email constraint (relational) / scan check (key-value)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_AGE, MAX_ITEM_QUANTITY, MIN_AGE, MIN_PASSWORD_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one `@` with a dot somewhere after it
/// - Maximum 254 characters
///
/// Full RFC 5322 parsing is not attempted; the backend treats the email
/// as an opaque unique key, so this only rejects obvious typos.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a username.
///
/// ## Rules
/// - Must not be empty
/// - Between 3 and 30 characters
/// - Alphanumeric plus hyphens and underscores
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: 3,
        });
    }

    if username.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 30,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a plaintext password at registration time.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LEN`] characters
/// - At most 128 characters (argon2 input bound)
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    if password.len() > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a registration age.
pub fn validate_age(age: i64) -> ValidationResult<()> {
    if age < MIN_AGE || age > MAX_AGE {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min: MIN_AGE,
            max: MAX_AGE,
        });
    }

    Ok(())
}

/// Validates a cart item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("maria.rossi@pizzeria.example").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("giuseppe").is_ok());
        assert!(validate_username("user_42").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(13).is_ok());
        assert!(validate_age(34).is_ok());
        assert!(validate_age(120).is_ok());

        assert!(validate_age(12).is_err());
        assert!(validate_age(121).is_err());
        assert!(validate_age(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(100).is_err());
    }
}
