//! Token and registration endpoints.

use axum::{http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::models::user::{self, NewUser};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// POST /auth/token - exchange credentials for a JWT
pub async fn token_post(Json(body): Json<TokenRequest>) -> Result<Json<Value>, ApiError> {
    let user = user::authenticate(&body.username, &body.password).await?;
    let token = generate_jwt(Claims::new(user.username, user.is_admin))?;

    Ok(Json(json!({ "token": token })))
}

/// POST /auth/register - create an account and return a JWT
///
/// Self-registration never grants admin rights.
pub async fn register_post(
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = user::register(NewUser {
        username: body.username,
        password: body.password,
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        is_admin: false,
    })
    .await?;

    let token = generate_jwt(Claims::new(user.username, user.is_admin))?;

    Ok((StatusCode::CREATED, Json(json!({ "token": token }))))
}
