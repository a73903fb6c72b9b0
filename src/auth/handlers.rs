use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::{
        dto::{AuthResponse, NextPageResponse, RefreshRequest},
        services::{AuthUser, JwtKeys},
    },
    error::{store_rejection, validation_rejection, Rejection},
    forms::{ForgotPasswordForm, LoginForm, ProfileForm, ResetPasswordForm, SignupForm},
    state::AppState,
    store::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/refresh", post(refresh))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me).put(update_me))
}

fn issue_tokens(state: &AppState, user: User) -> Result<AuthResponse, Rejection> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(&user).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    let refresh_token = keys.sign_refresh(&user).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user,
    })
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginForm>,
) -> Result<Json<AuthResponse>, Rejection> {
    payload.validate().map_err(validation_rejection)?;

    let user = state
        .store
        .login(&payload.email, &payload.password)
        .await
        .map_err(store_rejection)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(issue_tokens(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupForm>,
) -> Result<(StatusCode, Json<NextPageResponse>), Rejection> {
    let next = payload.validate().map_err(validation_rejection)?;

    state
        .store
        .signup(&payload.name, &payload.email)
        .await
        .map_err(store_rejection)?;

    info!(email = %payload.email.trim(), "user registered");
    Ok((
        StatusCode::CREATED,
        Json(NextPageResponse {
            message: "Account created. Check your inbox to verify your email.".into(),
            next,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, Rejection> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, format!("{}", e)))?;

    let user = state.store.get_user(&claims.sub).await.map_err(|_| {
        (StatusCode::UNAUTHORIZED, "User not found".to_string())
    })?;
    Ok(Json(issue_tokens(&state, user)?))
}

/// Demo flow: no email is sent.
#[instrument(skip(payload))]
pub async fn forgot_password(
    Json(payload): Json<ForgotPasswordForm>,
) -> Result<Json<NextPageResponse>, Rejection> {
    let next = payload.validate().map_err(validation_rejection)?;
    Ok(Json(NextPageResponse {
        message: "If the address is registered, a reset link is on its way.".into(),
        next,
    }))
}

/// Demo flow: the password is checked but not stored.
#[instrument(skip(payload))]
pub async fn reset_password(
    Json(payload): Json<ResetPasswordForm>,
) -> Result<Json<NextPageResponse>, Rejection> {
    let next = payload.validate().map_err(validation_rejection)?;
    Ok(Json(NextPageResponse {
        message: "Password has been reset successfully!".into(),
        next,
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<User>, Rejection> {
    let me = state.store.get_user(&user.user_id).await.map_err(|e| {
        error!(error = %e, user_id = %user.user_id, "user not found");
        (StatusCode::UNAUTHORIZED, e.to_string())
    })?;
    Ok(Json(me))
}

#[instrument(skip(state, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProfileForm>,
) -> Result<Json<User>, Rejection> {
    payload.validate().map_err(validation_rejection)?;

    let mut me = state
        .store
        .get_user(&user.user_id)
        .await
        .map_err(store_rejection)?;
    me.name = payload.name;
    let updated = state
        .store
        .update_user_profile(&me)
        .await
        .map_err(store_rejection)?;
    Ok(Json(updated))
}
