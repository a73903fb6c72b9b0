use thiserror::Error;

/// Failures reported by the mock data service. The display text is shown to
/// the end user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("An account with this email already exists.")]
    EmailTaken,
    #[error("User not found.")]
    UserNotFound,
    #[error("Shipment not found.")]
    ShipmentNotFound,
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}
