//! Authenticated user profile.

use serde::{Deserialize, Serialize};

/// User profile as returned by the auth API and persisted under the
/// `userData` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_round_trips_camel_case() {
        let user = User {
            id: 7,
            username: "emilys".to_string(),
            email: "emily@example.com".to_string(),
            first_name: "Emily".to_string(),
            last_name: "Johnson".to_string(),
            token: "abc".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"firstName\":\"Emily\""));

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
