//! # Domain Types
//!
//! Core domain types shared by the persistence layer and the frontend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    NewUser      │   │   UserProfile   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  stored record  │   │  registration   │   │  mutable subset │       │
//! │  │  password_hash  │   │  plain password │   │  keyed by email │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    CartItem     │  one menu product + quantity, price frozen         │
//! │  └─────────────────┘  at the moment it entered the cart                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The email address is the unique, immutable business key of a user.
//! The relational backend additionally assigns an autoincrement row id,
//! but nothing outside that backend ever sees it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// User
// =============================================================================

/// A registered user as persisted by either storage backend.
///
/// ## Passwords
/// Only the argon2 hash is ever stored. The plaintext password exists
/// solely inside [`NewUser`] during registration and in the login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    /// Display handle chosen by the user.
    pub username: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Unique business key. Never rewritten after registration.
    pub email: String,

    /// Age in years at registration time.
    pub age: i64,

    /// Free-form gender string as entered in the registration form.
    pub gender: String,

    /// Argon2 PHC string. Serialized because the key-value backend
    /// persists whole records; the facade never hands a `User` with this
    /// field to the frontend.
    pub password_hash: String,

    /// Optional base64-encoded profile photo.
    pub photo: Option<String>,
}

impl User {
    /// Applies the mutable profile fields, leaving email, password hash
    /// and photo untouched.
    pub fn apply_profile(&mut self, profile: &UserProfile) {
        self.username = profile.username.clone();
        self.first_name = profile.first_name.clone();
        self.last_name = profile.last_name.clone();
        self.age = profile.age;
        self.gender = profile.gender.clone();
    }
}

// =============================================================================
// New User (registration input)
// =============================================================================

/// Registration form data. Carries the plaintext password, which the
/// persistence layer hashes before anything is written.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i64,
    pub gender: String,
    pub password: String,
    pub photo: Option<String>,
}

impl NewUser {
    /// Converts the registration input into a storable record with the
    /// given password hash.
    pub fn into_user(self, password_hash: String) -> User {
        User {
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            age: self.age,
            gender: self.gender,
            password_hash,
            photo: self.photo,
        }
    }
}

// =============================================================================
// User Profile (update input)
// =============================================================================

/// The fields a user may edit after registration, keyed by the immutable
/// email. Email, password and photo are deliberately absent: the profile
/// update path never rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    /// Lookup key (WHERE clause / scan key), not an editable field.
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            age: user.age,
            gender: user.gender.clone(),
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the cart: one menu product and how many of it.
///
/// This is also the persisted cart layout: the cart store serializes a
/// `Vec<CartItem>` wholesale under a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Menu product id from the catalog.
    pub product_id: i64,

    /// Product name at the time of adding (frozen).
    pub name: String,

    /// Unit price in cents at the time of adding (frozen).
    pub price_cents: i64,

    /// Quantity, always >= 1 while the item is present.
    pub quantity: i64,
}

impl CartItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents * self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            username: "giuseppe".to_string(),
            first_name: "Giuseppe".to_string(),
            last_name: "Rossi".to_string(),
            email: "giuseppe@example.com".to_string(),
            age: 34,
            gender: "male".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            photo: None,
        }
    }

    #[test]
    fn apply_profile_touches_only_mutable_fields() {
        let mut user = sample_user();
        let profile = UserProfile {
            email: user.email.clone(),
            username: "peppe".to_string(),
            first_name: "Peppe".to_string(),
            last_name: "Rossi".to_string(),
            age: 35,
            gender: "male".to_string(),
        };

        user.apply_profile(&profile);

        assert_eq!(user.username, "peppe");
        assert_eq!(user.age, 35);
        // Immutable fields survive
        assert_eq!(user.email, "giuseppe@example.com");
        assert_eq!(user.password_hash, "$argon2id$stub");
    }

    #[test]
    fn new_user_into_user_carries_hash() {
        let new_user = NewUser {
            username: "giuseppe".to_string(),
            first_name: "Giuseppe".to_string(),
            last_name: "Rossi".to_string(),
            email: "giuseppe@example.com".to_string(),
            age: 34,
            gender: "male".to_string(),
            password: "plaintext".to_string(),
            photo: Some("base64data".to_string()),
        };

        let user = new_user.into_user("$argon2id$hash".to_string());
        assert_eq!(user.password_hash, "$argon2id$hash");
        assert_eq!(user.photo.as_deref(), Some("base64data"));
    }

    #[test]
    fn cart_item_line_total() {
        let item = CartItem {
            product_id: 1,
            name: "Margherita".to_string(),
            price_cents: 5000,
            quantity: 3,
        };
        assert_eq!(item.line_total_cents(), 15000);
    }
}
