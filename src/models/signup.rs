use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A signup request joining a user (by email) to a volunteer post (by id).
/// Created on signup, deleted on cancellation, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Email of the volunteer who signed up; queried on the list-by-email route.
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Hex id of the post being signed up for. When present, the post's
    /// `volunteers_needed` counter is decremented together with the insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,

    /// Post snapshot, suggestion text, status, etc. — passed through verbatim.
    #[serde(flatten)]
    pub extra: Document,
}

impl VolunteerRequest {
    /// The post this signup points at, if the body carried a parseable id.
    pub fn post_object_id(&self) -> Option<ObjectId> {
        self.post_id
            .as_deref()
            .and_then(|id| ObjectId::parse_str(id).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_email_rename() {
        let signup: VolunteerRequest = serde_json::from_value(serde_json::json!({
            "userEmail": "vol@x.com",
            "suggestion": "happy to help"
        }))
        .unwrap();

        assert_eq!(signup.user_email.as_deref(), Some("vol@x.com"));
        assert_eq!(signup.extra.get_str("suggestion").unwrap(), "happy to help");
        assert!(signup.post_object_id().is_none());
    }

    #[test]
    fn test_post_object_id_parses_hex() {
        let id = ObjectId::new();
        let signup: VolunteerRequest = serde_json::from_value(serde_json::json!({
            "userEmail": "vol@x.com",
            "post_id": id.to_hex()
        }))
        .unwrap();
        assert_eq!(signup.post_object_id(), Some(id));
    }

    #[test]
    fn test_post_object_id_ignores_garbage() {
        let signup: VolunteerRequest = serde_json::from_value(serde_json::json!({
            "post_id": "garbage"
        }))
        .unwrap();
        assert!(signup.post_object_id().is_none());
    }
}
