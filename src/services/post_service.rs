use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Cursor;

use crate::database::{self, MongoDB};
use crate::models::VolunteerPost;
use crate::utils::error::AppError;
use crate::utils::parse_object_id;

async fn drain(mut cursor: Cursor<VolunteerPost>) -> Vec<VolunteerPost> {
    let mut posts = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(post) => posts.push(post),
            Err(e) => log::error!("❌ Failed to decode post document: {}", e),
        }
    }
    posts
}

/// All posts, soonest deadline first.
pub async fn list_posts(db: &MongoDB) -> Result<Vec<VolunteerPost>, AppError> {
    let collection = db.collection::<VolunteerPost>(database::POSTS);
    let cursor = collection.find(doc! {}).sort(doc! { "deadline": 1 }).await?;
    Ok(drain(cursor).await)
}

/// Query for the search route: optional case-insensitive substring match on
/// the title, ANDed with an optional category equality filter.
pub fn build_search_filter(search: Option<&str>, category: Option<&str>) -> Document {
    let mut query = doc! {};
    if let Some(search) = search {
        query.insert("post_title", doc! { "$regex": search, "$options": "i" });
    }
    if let Some(category) = category {
        query.insert("category", category);
    }
    query
}

pub async fn search_posts(
    db: &MongoDB,
    search: Option<&str>,
    category: Option<&str>,
) -> Result<Vec<VolunteerPost>, AppError> {
    let collection = db.collection::<VolunteerPost>(database::POSTS);
    let cursor = collection
        .find(build_search_filter(search, category))
        .sort(doc! { "deadline": 1 })
        .await?;
    Ok(drain(cursor).await)
}

/// Fetch one post. No match is not an error: callers get `None`, which
/// renders as a null body, matching what the frontend expects.
pub async fn get_post(db: &MongoDB, id: &str) -> Result<Option<VolunteerPost>, AppError> {
    let object_id = parse_object_id(id)?;
    let collection = db.collection::<VolunteerPost>(database::POSTS);

    Ok(collection.find_one(doc! { "_id": object_id }).await?)
}

/// Insert the body verbatim; returns the generated id.
pub async fn create_post(db: &MongoDB, post: &VolunteerPost) -> Result<ObjectId, AppError> {
    let collection = db.collection::<VolunteerPost>(database::POSTS);
    let result = collection.insert_one(post).await?;

    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Database("insert did not return an ObjectId".to_string()))
}

/// `$set` merge of the submitted fields, inserting the document if missing.
pub async fn update_post(
    db: &MongoDB,
    id: &str,
    post: &VolunteerPost,
) -> Result<mongodb::results::UpdateResult, AppError> {
    let object_id = parse_object_id(id)?;
    let fields = mongodb::bson::to_document(post)
        .map_err(|e| AppError::InvalidRequest(format!("unserializable body: {}", e)))?;

    let collection = db.collection::<VolunteerPost>(database::POSTS);
    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": fields })
        .upsert(true)
        .await?;

    Ok(result)
}

/// Lower `volunteers_needed` by exactly 1. No floor check: the counter may go
/// negative, matching what callers already rely on.
pub async fn decrement_volunteers_needed(
    db: &MongoDB,
    id: &str,
) -> Result<mongodb::results::UpdateResult, AppError> {
    let object_id = parse_object_id(id)?;
    let collection = db.collection::<VolunteerPost>(database::POSTS);

    let result = collection
        .update_one(
            doc! { "_id": object_id },
            doc! { "$inc": { "volunteers_needed": -1 } },
        )
        .await?;

    Ok(result)
}

pub async fn delete_post(
    db: &MongoDB,
    id: &str,
) -> Result<mongodb::results::DeleteResult, AppError> {
    let object_id = parse_object_id(id)?;
    let collection = db.collection::<VolunteerPost>(database::POSTS);

    let result = collection.delete_one(doc! { "_id": object_id }).await?;
    Ok(result)
}

/// Posts organized by one email, for the "my posts" page.
pub async fn posts_by_organizer(
    db: &MongoDB,
    email: &str,
) -> Result<Vec<VolunteerPost>, AppError> {
    let collection = db.collection::<VolunteerPost>(database::POSTS);
    let cursor = collection.find(doc! { "organizer_email": email }).await?;
    Ok(drain(cursor).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_empty() {
        assert_eq!(build_search_filter(None, None), doc! {});
    }

    #[test]
    fn test_search_filter_title_only() {
        let query = build_search_filter(Some("beach"), None);
        assert_eq!(
            query,
            doc! { "post_title": { "$regex": "beach", "$options": "i" } }
        );
    }

    #[test]
    fn test_search_filter_category_only() {
        let query = build_search_filter(None, Some("Environment"));
        assert_eq!(query, doc! { "category": "Environment" });
    }

    #[test]
    fn test_search_filter_combines_with_and() {
        // Both present: one document, both conditions must hold
        let query = build_search_filter(Some("clean"), Some("Environment"));
        assert_eq!(
            query,
            doc! {
                "post_title": { "$regex": "clean", "$options": "i" },
                "category": "Environment",
            }
        );
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_create_then_fetch_round_trip() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/volunteerDB".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let post: VolunteerPost = serde_json::from_value(serde_json::json!({
            "post_title": "Beach Cleanup",
            "category": "Environment",
            "deadline": "2025-01-01",
            "volunteers_needed": 5,
            "organizer_email": "a@x.com"
        }))
        .unwrap();

        let id = create_post(&db, &post).await.unwrap();
        let fetched = get_post(&db, &id.to_hex())
            .await
            .unwrap()
            .expect("created post not found");
        assert_eq!(fetched.post_title.as_deref(), Some("Beach Cleanup"));
        assert_eq!(fetched.volunteers_needed, Some(5));

        delete_post(&db, &id.to_hex()).await.unwrap();

        // Fetching a deleted (or never-existing) post is not an error
        let gone = get_post(&db, &id.to_hex()).await.unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_double_decrement_lowers_counter_by_two() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/volunteerDB".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let post: VolunteerPost = serde_json::from_value(serde_json::json!({
            "post_title": "River Cleanup",
            "volunteers_needed": 5,
            "organizer_email": "org@x.com"
        }))
        .unwrap();
        let id = create_post(&db, &post).await.unwrap();

        decrement_volunteers_needed(&db, &id.to_hex()).await.unwrap();
        decrement_volunteers_needed(&db, &id.to_hex()).await.unwrap();

        let fetched = get_post(&db, &id.to_hex()).await.unwrap().unwrap();
        assert_eq!(fetched.volunteers_needed, Some(3));

        delete_post(&db, &id.to_hex()).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_decrement_has_no_floor_and_goes_negative() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/volunteerDB".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let post: VolunteerPost = serde_json::from_value(serde_json::json!({
            "post_title": "Full Event",
            "volunteers_needed": 0,
            "organizer_email": "org@x.com"
        }))
        .unwrap();
        let id = create_post(&db, &post).await.unwrap();

        decrement_volunteers_needed(&db, &id.to_hex()).await.unwrap();

        let fetched = get_post(&db, &id.to_hex()).await.unwrap().unwrap();
        assert_eq!(fetched.volunteers_needed, Some(-1));

        delete_post(&db, &id.to_hex()).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_list_posts_sorted_by_deadline() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/volunteerDB".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        // Insert deliberately out of order
        let mut ids = Vec::new();
        for deadline in ["2025-03-01", "2025-01-15", "2025-02-10"] {
            let post: VolunteerPost = serde_json::from_value(serde_json::json!({
                "post_title": format!("Event {}", deadline),
                "deadline": deadline,
                "organizer_email": "org@x.com"
            }))
            .unwrap();
            ids.push(create_post(&db, &post).await.unwrap());
        }

        let posts = list_posts(&db).await.unwrap();
        let deadlines: Vec<&str> = posts
            .iter()
            .filter_map(|p| p.deadline.as_deref())
            .collect();
        assert!(
            deadlines.windows(2).all(|w| w[0] <= w[1]),
            "deadlines not non-decreasing: {:?}",
            deadlines
        );

        for id in ids {
            delete_post(&db, &id.to_hex()).await.unwrap();
        }
    }
}
