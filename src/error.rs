use axum::http::StatusCode;
use tracing::warn;

use crate::forms::ValidationError;
use crate::store::StoreError;

/// Error half of every handler result: status plus the message shown to the
/// user.
pub type Rejection = (StatusCode, String);

pub fn store_rejection(e: StoreError) -> Rejection {
    let status = match e {
        StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        StoreError::EmailTaken => StatusCode::CONFLICT,
        StoreError::UserNotFound | StoreError::ShipmentNotFound => StatusCode::NOT_FOUND,
        StoreError::InvalidSeed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(error = %e, %status, "store call rejected");
    (status, e.to_string())
}

pub fn validation_rejection(e: ValidationError) -> Rejection {
    warn!(error = %e, "invalid input");
    (StatusCode::BAD_REQUEST, e.to_string())
}
