use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::VolunteerPost;
use crate::services::auth_service::{self, Claims};
use crate::services::post_service;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize)]
pub struct PostSearchQuery {
    pub search: Option<String>,
    pub filter: Option<String>,
}

#[utoipa::path(
    get,
    path = "/volunteers",
    tag = "Posts",
    responses(
        (status = 200, description = "All posts, soonest deadline first")
    )
)]
pub async fn list_posts(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /volunteers");

    let posts = post_service::list_posts(&db).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    get,
    path = "/volunteer",
    tag = "Posts",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive title substring"),
        ("filter" = Option<String>, Query, description = "Category equality filter")
    ),
    responses(
        (status = 200, description = "Matching posts, soonest deadline first")
    )
)]
pub async fn search_posts(
    db: web::Data<MongoDB>,
    query: web::Query<PostSearchQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "🔍 GET /volunteer - search: {:?}, filter: {:?}",
        query.search,
        query.filter
    );

    let posts =
        post_service::search_posts(&db, query.search.as_deref(), query.filter.as_deref()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    get,
    path = "/volunteer/{id}",
    tag = "Posts",
    params(
        ("id" = String, Path, description = "Post id (hex)")
    ),
    responses(
        (status = 200, description = "The post, or null when nothing matches"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_post(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("📄 GET /volunteer/{}", id);

    // No match renders as a null body, not an error
    let post = post_service::get_post(&db, &id).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn create_post(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    body: web::Json<VolunteerPost>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /volunteer - organizer: {}", user.email);

    let id = post_service::create_post(&db, &body).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "insertedId": id.to_hex(),
    })))
}

pub async fn update_post(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<VolunteerPost>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("✏️  PUT /volunteer/{} - by: {}", id, user.email);

    let result = post_service::update_post(&db, &id, &body).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id.and_then(|id| id.as_object_id()).map(|id| id.to_hex()),
    })))
}

pub async fn delete_post(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /volunteer/{} - by: {}", id, user.email);

    let result = post_service::delete_post(&db, &id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "deletedCount": result.deleted_count,
    })))
}

/// PATCH /requestUpdate/{id} - lower the open-slots counter by one.
pub async fn decrement_volunteers(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("➖ PATCH /requestUpdate/{}", id);

    let result = post_service::decrement_volunteers_needed(&db, &id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

/// GET /myPost/{email} - posts organized by the caller. Owner-checked.
pub async fn my_posts(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    auth_service::assert_owner(&user, &email)?;

    log::info!("📋 GET /myPost/{}", email);

    let posts = post_service::posts_by_organizer(&db, &email).await?;
    Ok(HttpResponse::Ok().json(posts))
}
