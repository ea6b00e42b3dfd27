//! Data access for users: authentication and registration.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config;
use crate::db;
use crate::models::ModelError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Row fetched during authentication; the password hash never leaves
/// this module.
#[derive(Debug, FromRow)]
struct UserCredentials {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    is_admin: bool,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Authenticate a user by username and password.
///
/// Returns the user without the password hash, or
/// `ModelError::InvalidCredentials` if the user does not exist or the
/// password is wrong. The two cases are indistinguishable to the caller.
pub async fn authenticate(username: &str, password: &str) -> Result<User, ModelError> {
    let row = sqlx::query_as::<_, UserCredentials>(
        "SELECT username, password, first_name, last_name, email, is_admin \
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(db::pool())
    .await?;

    if let Some(row) = row {
        if bcrypt::verify(password, &row.password)? {
            return Ok(User {
                username: row.username,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                is_admin: row.is_admin,
            });
        }
    }

    Err(ModelError::InvalidCredentials)
}

/// Register a new user; fails on a duplicate username.
pub async fn register(data: NewUser) -> Result<User, ModelError> {
    let existing = sqlx::query_as::<_, (String,)>("SELECT username FROM users WHERE username = $1")
        .bind(&data.username)
        .fetch_optional(db::pool())
        .await?;

    if existing.is_some() {
        return Err(ModelError::Duplicate(format!(
            "Duplicate username: {}",
            data.username
        )));
    }

    let cost = config::config().security.bcrypt_cost;
    let hashed = bcrypt::hash(&data.password, cost)?;

    Ok(sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING username, first_name, last_name, email, is_admin",
    )
    .bind(&data.username)
    .bind(&hashed)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(data.is_admin)
    .fetch_one(db::pool())
    .await?)
}
