use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::ClientSession;

use crate::database::{self, MongoDB};
use crate::models::{VolunteerPost, VolunteerRequest};
use crate::utils::error::AppError;
use crate::utils::parse_object_id;

/// Record a signup. When the body names a post, the insert and the post's
/// counter decrement are issued in one transaction so the two collections
/// cannot diverge under partial failure. Deployments without transaction
/// support (standalone mongod) fall back to sequential writes.
pub async fn create_signup(
    db: &MongoDB,
    signup: &VolunteerRequest,
) -> Result<ObjectId, AppError> {
    match signup.post_object_id() {
        Some(post_id) => insert_with_decrement(db, signup, post_id).await,
        None => {
            let collection = db.collection::<VolunteerRequest>(database::SIGNUPS);
            let result = collection.insert_one(signup).await?;
            inserted_object_id(&result)
        }
    }
}

async fn insert_with_decrement(
    db: &MongoDB,
    signup: &VolunteerRequest,
    post_id: ObjectId,
) -> Result<ObjectId, AppError> {
    let mut session = match db.client().start_session().await {
        Ok(session) => session,
        Err(e) => {
            log::warn!("⚠️  Could not open a session ({}), writing sequentially", e);
            return insert_then_decrement(db, signup, post_id).await;
        }
    };

    if let Err(e) = session.start_transaction().await {
        log::warn!("⚠️  Transactions unavailable ({}), writing sequentially", e);
        return insert_then_decrement(db, signup, post_id).await;
    }

    match transactional_writes(db, &mut session, signup, post_id).await {
        Ok(result) => inserted_object_id(&result),
        Err(e) => {
            if let Err(abort_err) = session.abort_transaction().await {
                log::error!("❌ Failed to abort signup transaction: {}", abort_err);
            }
            Err(e.into())
        }
    }
}

async fn transactional_writes(
    db: &MongoDB,
    session: &mut ClientSession,
    signup: &VolunteerRequest,
    post_id: ObjectId,
) -> Result<mongodb::results::InsertOneResult, mongodb::error::Error> {
    let signups = db.collection::<VolunteerRequest>(database::SIGNUPS);
    let posts = db.collection::<VolunteerPost>(database::POSTS);

    let inserted = signups
        .insert_one(signup)
        .session(&mut *session)
        .await?;

    posts
        .update_one(
            doc! { "_id": post_id },
            doc! { "$inc": { "volunteers_needed": -1 } },
        )
        .session(&mut *session)
        .await?;

    session.commit_transaction().await?;

    Ok(inserted)
}

/// Sequential fallback: two independent writes, no rollback. A decrement
/// failure after the insert is logged and surfaced, but the signup stays.
async fn insert_then_decrement(
    db: &MongoDB,
    signup: &VolunteerRequest,
    post_id: ObjectId,
) -> Result<ObjectId, AppError> {
    let signups = db.collection::<VolunteerRequest>(database::SIGNUPS);
    let posts = db.collection::<VolunteerPost>(database::POSTS);

    let result = signups.insert_one(signup).await?;

    if let Err(e) = posts
        .update_one(
            doc! { "_id": post_id },
            doc! { "$inc": { "volunteers_needed": -1 } },
        )
        .await
    {
        log::error!(
            "❌ Signup recorded but counter decrement failed for post {}: {}",
            post_id.to_hex(),
            e
        );
        return Err(e.into());
    }

    inserted_object_id(&result)
}

fn inserted_object_id(
    result: &mongodb::results::InsertOneResult,
) -> Result<ObjectId, AppError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Database("insert did not return an ObjectId".to_string()))
}

/// Signups belonging to one user's email.
pub async fn list_signups(
    db: &MongoDB,
    email: &str,
) -> Result<Vec<VolunteerRequest>, AppError> {
    let collection = db.collection::<VolunteerRequest>(database::SIGNUPS);
    let mut cursor = collection.find(doc! { "userEmail": email }).await?;

    let mut signups = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(signup) => signups.push(signup),
            Err(e) => log::error!("❌ Failed to decode signup document: {}", e),
        }
    }
    Ok(signups)
}

pub async fn delete_signup(
    db: &MongoDB,
    id: &str,
) -> Result<mongodb::results::DeleteResult, AppError> {
    let object_id = parse_object_id(id)?;
    let collection = db.collection::<VolunteerRequest>(database::SIGNUPS);

    let result = collection.delete_one(doc! { "_id": object_id }).await?;
    Ok(result)
}
