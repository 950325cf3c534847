//! Account records and the request payloads that create or authenticate them.

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use super::error::{AccountError, MISSING_LOGIN_FIELDS, MISSING_REGISTRATION_FIELDS};

/// A persisted account. The plaintext password is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub username: String,
    pub age: i32,
    pub password_hash: String,
    pub email: String,
}

/// Registration input after presence checks, still holding the plaintext password.
pub struct NewCustomer {
    pub username: String,
    pub age: i32,
    pub password: String,
    pub email: String,
}

impl NewCustomer {
    pub(super) fn into_customer(self, password_hash: String) -> Customer {
        Customer {
            username: self.username,
            age: self.age,
            password_hash,
            email: self.email,
        }
    }
}

/// Username/password pair after presence checks.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Deserialize, Default)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_age")]
    #[schema(value_type = Option<i32>)]
    pub age: Option<i32>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl RegistrationRequest {
    /// Check that every field is present.
    ///
    /// # Errors
    /// Returns `AccountError::Validation` when any field is missing or blank.
    pub fn validate(self) -> Result<NewCustomer, AccountError> {
        match (
            present(self.user_name),
            self.age,
            present(self.password),
            present(self.email),
        ) {
            (Some(username), Some(age), Some(password), Some(email)) => Ok(NewCustomer {
                username,
                age,
                password,
                email,
            }),
            _ => Err(AccountError::Validation(MISSING_REGISTRATION_FIELDS)),
        }
    }
}

#[derive(ToSchema, Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// # Errors
    /// Returns `AccountError::Validation` when the username or password is missing.
    pub fn validate(self) -> Result<Credentials, AccountError> {
        match (present(self.user_name), present(self.password)) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(AccountError::Validation(MISSING_LOGIN_FIELDS)),
        }
    }
}

/// Whitespace-only strings count as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AgeValue {
    Number(i64),
    Text(String),
}

// Browsers post forms, so the age arrives either as a JSON number or as text.
fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<AgeValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AgeValue::Number(n)) => i32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom("age is out of range")),
        Some(AgeValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i32>()
                .map(Some)
                .map_err(|_| D::Error::custom("age must be an integer"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registration(value: serde_json::Value) -> RegistrationRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn registration_accepts_complete_payload() {
        let request = registration(json!({
            "user_name": "alice",
            "age": 30,
            "password": "pw123",
            "email": "a@x.com"
        }));
        let new_customer = request.validate().unwrap();
        assert_eq!(new_customer.username, "alice");
        assert_eq!(new_customer.age, 30);
        assert_eq!(new_customer.password, "pw123");
        assert_eq!(new_customer.email, "a@x.com");
    }

    #[test]
    fn registration_rejects_each_missing_field() {
        let full = json!({
            "user_name": "alice",
            "age": 30,
            "password": "pw123",
            "email": "a@x.com"
        });
        for field in ["user_name", "age", "password", "email"] {
            let mut payload = full.clone();
            payload.as_object_mut().unwrap().remove(field);
            let err = registration(payload).validate().err().unwrap();
            assert!(
                matches!(err, AccountError::Validation(MISSING_REGISTRATION_FIELDS)),
                "missing {field} should fail validation"
            );
        }
    }

    #[test]
    fn registration_treats_blank_strings_as_missing() {
        let request = registration(json!({
            "user_name": "   ",
            "age": 30,
            "password": "pw123",
            "email": "a@x.com"
        }));
        assert!(request.validate().is_err());
    }

    #[test]
    fn age_accepts_numeric_text() {
        let request = registration(json!({ "age": " 42 " }));
        assert_eq!(request.age, Some(42));

        let request = registration(json!({ "age": "" }));
        assert_eq!(request.age, None);

        let request = registration(json!({ "age": null }));
        assert_eq!(request.age, None);
    }

    #[test]
    fn age_rejects_non_numeric_and_out_of_range() {
        assert!(serde_json::from_value::<RegistrationRequest>(json!({ "age": "old" })).is_err());
        assert!(
            serde_json::from_value::<RegistrationRequest>(json!({ "age": 1_i64 << 40 })).is_err()
        );
    }

    #[test]
    fn zero_age_is_present() {
        let request = registration(json!({
            "user_name": "bob",
            "age": 0,
            "password": "pw",
            "email": "b@x.com"
        }));
        assert_eq!(request.validate().map(|c| c.age).ok(), Some(0));
    }

    #[test]
    fn login_requires_both_fields() {
        let ok: LoginRequest =
            serde_json::from_value(json!({ "user_name": "alice", "password": "pw123" })).unwrap();
        assert_eq!(ok.validate().map(|c| c.username).ok().as_deref(), Some("alice"));

        let missing: LoginRequest = serde_json::from_value(json!({ "user_name": "alice" })).unwrap();
        assert!(matches!(
            missing.validate(),
            Err(AccountError::Validation(MISSING_LOGIN_FIELDS))
        ));
    }
}
