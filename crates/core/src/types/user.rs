//! User profile record owned by the users service.

use serde::{Deserialize, Serialize};

use super::Username;

/// A registered store user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: Username,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_image: String,
}

impl User {
    /// Create a user record for registration.
    #[must_use]
    pub fn new(username: impl Into<Username>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            profile_image: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_format() {
        let user = User::new("alice", "Alice Smith");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["displayName"], "Alice Smith");
        assert_eq!(json["profileImage"], "");
    }

    #[test]
    fn test_user_missing_optional_fields() {
        let user: User = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert_eq!(user.username.as_str(), "bob");
        assert!(user.display_name.is_empty());
    }
}
