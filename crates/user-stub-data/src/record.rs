//! Generated user record type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A synthetic user record.
///
/// Serialises with camelCase keys: `name`, `avatar`, `departments` and
/// `userId`.
///
/// ## Invariants
/// - `departments` holds one to three distinct catalogue labels.
/// - `user_id` is a UUID v4.
///
/// # Example
///
/// ```
/// use user_stub_data::UserRecord;
/// use uuid::Uuid;
///
/// let user = UserRecord {
///     name: "Ada Lovelace".to_owned(),
///     avatar: "https://avatars.githubusercontent.com/u/1".to_owned(),
///     departments: vec!["Paint".to_owned()],
///     user_id: Uuid::new_v4(),
/// };
///
/// let json = serde_json::to_value(&user).expect("serialise");
/// assert!(json.get("userId").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Human-readable full name.
    pub name: String,
    /// URL of the user's avatar image.
    pub avatar: String,
    /// Departments the user is assigned to.
    pub departments: Vec<String>,
    /// Unique identifier for the user.
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serialises_with_camel_case_keys() {
        let user = UserRecord {
            name: "Grace Hopper".to_owned(),
            avatar: "https://avatars.githubusercontent.com/u/7".to_owned(),
            departments: vec!["Hardware".to_owned(), "Paint".to_owned()],
            user_id: Uuid::nil(),
        };

        let value = serde_json::to_value(&user).expect("serialise user");

        assert_eq!(
            value,
            json!({
                "name": "Grace Hopper",
                "avatar": "https://avatars.githubusercontent.com/u/7",
                "departments": ["Hardware", "Paint"],
                "userId": "00000000-0000-0000-0000-000000000000"
            })
        );
    }
}
