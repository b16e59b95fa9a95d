use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{
        jwt::{encode_token, make_claims},
        password,
    },
    db::{entities::user, user_repo},
    error::AppError,
    response::{ApiResponse, ApiResult},
    state::AppState,
};

const TOKEN_TTL_SECS: usize = 60 * 60; // 1 hour

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    access_token: String,
    token_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    id: Uuid,
    email: String,
    created_at: DateTimeWithTimeZone,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<UserResponse> {
    let email = body.email.trim().to_ascii_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Please provide a valid email"));
    }
    if user_repo::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let hash = password::hash_password(&body.password)?;
    let user = user_repo::create_user(&state.db, &email, &hash).await?;
    ApiResponse::with_message(
        StatusCode::CREATED,
        "User registered successfully",
        user.into(),
    )
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let email = body.email.trim().to_ascii_lowercase();
    let user = user_repo::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;
    if !password::verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let user = user_repo::touch_last_login(&state.db, user).await?;
    let claims = make_claims(&user.id, TOKEN_TTL_SECS);
    let token = encode_token(&state.jwt, &claims)?;

    ApiResponse::ok(TokenResponse {
        access_token: token,
        token_type: "Bearer",
    })
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            created_at: model.created_at,
        }
    }
}
