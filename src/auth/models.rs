//! Authentication models

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// User record as returned by the identity endpoint.
///
/// The remote owns this shape; everything past `id` and `name` is optional
/// and passed through without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Login response with token
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Account registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Check the registration password policy: non-empty, at least 8
/// characters, and at least one letter. The confirmation must match.
pub fn validate_password(password: &str, confirmation: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(Error::Validation("password must not be empty".to_string()));
    }
    if password.len() < 8 {
        return Err(Error::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(Error::Validation(
            "password must contain at least one letter".to_string(),
        ));
    }
    if password != confirmation {
        return Err(Error::Validation("passwords do not match".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_minimal_payload() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"A"}"#).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "A");
        assert!(user.email.is_none());
        assert!(user.role.is_none());
    }

    #[test]
    fn test_password_policy_accepts_valid() {
        assert!(validate_password("hunter2hunter2", "hunter2hunter2").is_ok());
    }

    #[test]
    fn test_password_policy_rejects_empty() {
        assert!(validate_password("", "").is_err());
        assert!(validate_password("   ", "   ").is_err());
    }

    #[test]
    fn test_password_policy_rejects_short() {
        assert!(validate_password("abc1234", "abc1234").is_err());
    }

    #[test]
    fn test_password_policy_rejects_all_digits() {
        assert!(validate_password("12345678", "12345678").is_err());
    }

    #[test]
    fn test_password_policy_rejects_mismatched_confirmation() {
        assert!(validate_password("hunter2hunter2", "hunter2hunter3").is_err());
    }
}
