//! Domain user record mirrored from the upstream test API.
//!
//! `id`, `name`, `username`, and `email` are mandatory for any user accepted
//! into the store; the remaining profile fields are carried verbatim when the
//! upstream (or a create request) supplies them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Geographic coordinates nested inside [`Address`].
///
/// The upstream API serialises these as strings, so they are carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Geo {
    /// Latitude, as serialised by the upstream API.
    pub lat: String,
    /// Longitude, as serialised by the upstream API.
    pub lng: String,
}

/// Postal address block on a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    /// Street name.
    pub street: String,
    /// Suite or apartment designation.
    pub suite: String,
    /// City name.
    pub city: String,
    /// Postal code.
    pub zipcode: String,
    /// Coordinates for the address.
    pub geo: Geo,
}

/// Company block on a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company name.
    pub name: String,
    /// Marketing catch phrase.
    pub catch_phrase: String,
    /// Line-of-business slug.
    pub bs: String,
}

/// A user record keyed by its upstream-assigned numeric identifier.
///
/// ## Invariants
/// - `id` is positive.
/// - `name`, `username`, and `email` are non-empty once trimmed.
///
/// Construct via [`User::validated`] to enforce these; deserialisation of
/// already-stored documents bypasses validation deliberately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Natural key assigned by the upstream API, distinct from any
    /// storage-assigned identity.
    pub id: i64,
    /// Full display name.
    pub name: String,
    /// Unique handle.
    pub username: String,
    /// Contact email, unique across the store.
    pub email: String,
    /// Postal address, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Phone number, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Company block, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Validation failures raised by [`User::validated`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The natural key is missing, zero, or negative.
    #[error("user id must be a positive integer")]
    InvalidId,
    /// A mandatory text field is empty.
    #[error("user {0} must not be empty")]
    EmptyField(&'static str),
}

impl User {
    /// Check the mandatory-field invariants, returning the user unchanged on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError`] when `id` is not positive or one of
    /// `name`, `username`, `email` is blank.
    pub fn validated(self) -> Result<Self, UserValidationError> {
        if self.id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        for (field, value) in [
            ("name", &self.name),
            ("username", &self.username),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(UserValidationError::EmptyField(field));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user() -> User {
        User {
            id: 1,
            name: "Leanne Graham".into(),
            username: "Bret".into(),
            email: "Sincere@april.biz".into(),
            address: None,
            phone: None,
            website: None,
            company: None,
        }
    }

    #[test]
    fn validated_accepts_complete_user() {
        let accepted = user().validated().expect("mandatory fields present");
        assert_eq!(accepted.id, 1);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn validated_rejects_non_positive_id(#[case] id: i64) {
        let mut candidate = user();
        candidate.id = id;
        assert_eq!(
            candidate.validated().expect_err("id must be rejected"),
            UserValidationError::InvalidId
        );
    }

    #[rstest]
    #[case::name("name")]
    #[case::username("username")]
    #[case::email("email")]
    fn validated_rejects_blank_mandatory_field(#[case] field: &str) {
        let mut candidate = user();
        match field {
            "name" => candidate.name = "  ".into(),
            "username" => candidate.username = String::new(),
            _ => candidate.email = " ".into(),
        }
        assert_eq!(
            candidate.validated().expect_err("blank field must be rejected"),
            UserValidationError::EmptyField(match field {
                "name" => "name",
                "username" => "username",
                _ => "email",
            })
        );
    }

    #[test]
    fn company_serialises_catch_phrase_in_camel_case() {
        let company = Company {
            name: "Romaguera-Crona".into(),
            catch_phrase: "Multi-layered client-server neural-net".into(),
            bs: "harness real-time e-markets".into(),
        };
        let json = serde_json::to_value(&company).expect("serialise company");
        assert!(json.get("catchPhrase").is_some());
        assert!(json.get("catch_phrase").is_none());
    }

    #[test]
    fn user_omits_absent_optional_fields() {
        let json = serde_json::to_value(user()).expect("serialise user");
        assert!(json.get("address").is_none());
        assert!(json.get("company").is_none());
    }
}
