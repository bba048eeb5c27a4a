use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A volunteering opportunity posted by an organizer (stored in MongoDB).
///
/// The store is schema-less: the named fields below are conventions used by
/// queries (sorting by `deadline`, filtering by `category`/`organizer_email`),
/// everything else the client sends is carried in `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerPost {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Open volunteer slots; decremented on signup, may go negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteers_needed: Option<i64>,

    /// ISO date string; lexicographic order matches chronological order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Any remaining client-supplied fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: Document,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_captures_extra_fields() {
        let post: VolunteerPost = serde_json::from_value(serde_json::json!({
            "post_title": "Beach Cleanup",
            "category": "Environment",
            "deadline": "2025-01-01",
            "volunteers_needed": 5,
            "organizer_email": "a@x.com",
            "banner_color": "#00aa88"
        }))
        .unwrap();

        assert_eq!(post.post_title.as_deref(), Some("Beach Cleanup"));
        assert_eq!(post.volunteers_needed, Some(5));
        assert_eq!(
            post.extra.get_str("banner_color").unwrap(),
            "#00aa88"
        );
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let post: VolunteerPost =
            serde_json::from_value(serde_json::json!({ "post_title": "Tree Planting" })).unwrap();
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["post_title"], "Tree Planting");
        assert!(value.get("description").is_none());
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_round_trip_preserves_submitted_fields() {
        let body = serde_json::json!({
            "post_title": "Food Drive",
            "description": "Collect canned goods",
            "category": "Social Service",
            "location": "Springfield",
            "volunteers_needed": 12,
            "deadline": "2025-06-30",
            "organizer_email": "org@x.com",
            "organizer_name": "Org",
            "thumbnail": "https://img.example/food.png",
            "notes": "bring gloves"
        });
        let post: VolunteerPost = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&post).unwrap(), body);
    }
}
