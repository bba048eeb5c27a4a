use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::User;
use crate::services::user_service;
use crate::utils::error::AppError;

pub async fn list_users(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    log::info!("👥 GET /user");

    let users = user_service::list_users(&db).await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn create_user(
    db: web::Data<MongoDB>,
    body: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 POST /user - email: {:?}", body.email);

    let id = user_service::create_user(&db, &body).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "insertedId": id.to_hex(),
    })))
}
