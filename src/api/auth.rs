use actix_web::{web, HttpResponse};

use crate::services::auth_service;
use crate::services::auth_service::SessionRequest;
use crate::utils::error::AppError;

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session cookie set"),
        (status = 500, description = "Token signing failed")
    )
)]
pub async fn issue_jwt(request: web::Json<SessionRequest>) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /jwt - email: {}", request.email);

    let token = auth_service::issue_token(&request.email)?;
    let cookie = auth_service::session_cookie(token, auth_service::is_production());

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "success": true })))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie cleared")
    )
)]
pub async fn logout() -> HttpResponse {
    log::info!("🚪 POST /logout");

    HttpResponse::Ok()
        .cookie(auth_service::removal_cookie(auth_service::is_production()))
        .json(serde_json::json!({ "success": true }))
}
