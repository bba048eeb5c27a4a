use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Platform user. Identity is the email by convention; uniqueness is not
/// enforced at the store level. Profile fields are whatever the client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Document,
}
