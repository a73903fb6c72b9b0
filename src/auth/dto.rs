use serde::{Deserialize, Serialize};

use crate::session::Page;
use crate::store::User;

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Response of the account flows that only move the user along
/// (signup, forgot password, reset password).
#[derive(Debug, Serialize)]
pub struct NextPageResponse {
    pub message: String,
    pub next: Page,
}
