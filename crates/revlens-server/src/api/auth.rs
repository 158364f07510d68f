//! Account handlers: register and login, both returning a bearer token.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{hash_password, verify_password},
    middleware::RequestId,
};

use super::{json_body, map_db_error, required_field, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TokenResponse {
    pub token: String,
}

pub(super) async fn register(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), ApiError> {
    let body = json_body(&req_id.0, payload)?;
    let username = required_field(&req_id.0, "username", body.username.as_deref())?;
    let email = required_field(&req_id.0, "email", body.email.as_deref())?;
    // Passwords are taken verbatim; only emptiness is rejected.
    let password = body
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::new(&req_id.0, "validation_error", "password is required"))?;

    let password_hash = hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        ApiError::new(&req_id.0, "internal_error", "could not create account")
    })?;

    let user = revlens_db::create_user(&state.pool, username, email, &password_hash)
        .await
        .map_err(|e| match e {
            revlens_db::DbError::Duplicate(_) => {
                ApiError::new(&req_id.0, "conflict", "email already registered")
            }
            other => map_db_error(req_id.0.clone(), &other),
        })?;

    tracing::info!(user_id = user.id, "registered user");
    let token = issue_token(&state, &req_id.0, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: TokenResponse { token },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let body = json_body(&req_id.0, payload)?;
    let email = required_field(&req_id.0, "email", body.email.as_deref())?;
    let password = body
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::new(&req_id.0, "validation_error", "password is required"))?;

    let user = revlens_db::get_user_by_email(&state.pool, email)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let Some(user) = user.filter(|u| verify_password(password, &u.password_hash)) else {
        return Err(ApiError::new(
            &req_id.0,
            "unauthorized",
            "Invalid credentials",
        ));
    };

    let token = issue_token(&state, &req_id.0, user.id)?;

    Ok(Json(ApiResponse {
        data: TokenResponse { token },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn issue_token(state: &AppState, request_id: &str, user_id: i64) -> Result<String, ApiError> {
    state.jwt.issue(user_id).map_err(|e| {
        tracing::error!(error = %e, user_id, "token signing failed");
        ApiError::new(request_id, "internal_error", "could not issue token")
    })
}
