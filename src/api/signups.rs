use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::VolunteerRequest;
use crate::services::auth_service::{self, Claims};
use crate::services::signup_service;
use crate::utils::error::AppError;

pub async fn create_signup(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    body: web::Json<VolunteerRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🙋 POST /beVolunteer - by: {}", user.email);

    let id = signup_service::create_signup(&db, &body).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "insertedId": id.to_hex(),
    })))
}

/// GET /beVolunteer/{email} - signups belonging to the caller. Owner-checked.
pub async fn list_signups(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    auth_service::assert_owner(&user, &email)?;

    log::info!("📋 GET /beVolunteer/{}", email);

    let signups = signup_service::list_signups(&db, &email).await?;
    Ok(HttpResponse::Ok().json(signups))
}

pub async fn delete_signup(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /beVolunteer/{} - by: {}", id, user.email);

    let result = signup_service::delete_signup(&db, &id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "deletedCount": result.deleted_count,
    })))
}
