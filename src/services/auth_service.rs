use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::AppError;

/// Name of the session cookie carrying the signed token.
pub const TOKEN_COOKIE: &str = "token";

/// Session lifetime. Long-lived on purpose: identity is client-asserted and
/// there is no credential store to re-check against.
const TOKEN_DAYS: i64 = 365;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
}

/// Body of `POST /jwt`. Extra profile fields the client sends alongside the
/// email are ignored; only the email goes into the token.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SessionRequest {
    pub email: String,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Cookie security attributes are relaxed outside production so the local
/// frontend (plain http) can hold a session.
pub fn is_production() -> bool {
    std::env::var("APP_ENV").map(|v| v == "production").unwrap_or(false)
}

fn sign_claims(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::Database(format!("Failed to generate token: {}", e)))
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("unauthorized access".to_string()))
}

/// Sign a session token for the given email, valid for 365 days.
pub fn issue_token(email: &str) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::days(TOKEN_DAYS)).timestamp() as usize;

    let claims = Claims {
        email: email.to_string(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
    };

    sign_claims(&claims, &get_jwt_secret())
}

/// Check signature and expiry of an inbound session token.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    decode_claims(token, &get_jwt_secret())
}

/// Build the session cookie holding a freshly signed token.
pub fn session_cookie(token: String, production: bool) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(production)
        .same_site(if production {
            SameSite::None
        } else {
            SameSite::Strict
        })
        .max_age(CookieDuration::days(TOKEN_DAYS))
        .finish()
}

/// Expired cookie that clears the session on logout.
pub fn removal_cookie(production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(production)
        .same_site(if production {
            SameSite::None
        } else {
            SameSite::Strict
        })
        .finish();
    cookie.make_removal();
    cookie
}

/// The only access-control rule in the system: the email a route was called
/// with must match the email inside the verified token.
pub fn assert_owner(claims: &Claims, email: &str) -> Result<(), AppError> {
    if claims.email != email {
        return Err(AppError::Forbidden("forbidden access".to_string()));
    }
    Ok(())
}
