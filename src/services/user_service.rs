use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{self, MongoDB};
use crate::models::User;
use crate::utils::error::AppError;

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let collection = db.collection::<User>(database::USERS);
    let mut cursor = collection.find(doc! {}).await?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(user),
            Err(e) => log::error!("❌ Failed to decode user document: {}", e),
        }
    }
    Ok(users)
}

/// Insert the body verbatim. No uniqueness check: the email is an identity by
/// convention only.
pub async fn create_user(db: &MongoDB, user: &User) -> Result<ObjectId, AppError> {
    let collection = db.collection::<User>(database::USERS);
    let result = collection.insert_one(user).await?;

    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Database("insert did not return an ObjectId".to_string()))
}
