//! Input checks the screens run before calling the data service.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::session::Page;
use crate::store::ShipmentDetails;

/// Couriers offered on the booking form.
pub const BOOKABLE_COURIERS: [&str; 5] = ["FedEx", "DHL", "UPS", "DTDC", "Blue Dart"];

/// Address the forgot-password demo treats as unregistered.
const UNKNOWN_RESET_EMAIL: &str = "notfound@test.com";

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingCredentials,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Full name cannot be empty.")]
    EmptyName,
    #[error("Passwords do not match!")]
    SignupPasswordMismatch,
    #[error("Please enter your email address.")]
    MissingEmail,
    #[error("No account was found with that email address.")]
    UnknownResetEmail,
    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    ResetPasswordMismatch,
    #[error("Destination country is required for international shipments.")]
    MissingDestinationCountry,
    #[error("Please fill out both origin and destination addresses.")]
    MissingAddresses,
    #[error("Unsupported courier: {0}")]
    UnknownCourier(String),
    #[error("Please provide both status and location.")]
    MissingStatusFields,
    #[error("Please enter a valid tracking ID.")]
    MissingTrackingId,
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// On success the caller signs up and moves to the returned page.
    pub fn validate(&self) -> Result<Page, ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::EmptyName);
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::SignupPasswordMismatch);
        }
        Ok(Page::verify_email(email.to_lowercase()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileForm {
    pub name: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<Page, ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if email.eq_ignore_ascii_case(UNKNOWN_RESET_EMAIL) {
            return Err(ValidationError::UnknownResetEmail);
        }
        Ok(Page::reset_password_sent(email))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<Page, ValidationError> {
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::ResetPasswordMismatch);
        }
        Ok(Page::Login)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentKind {
    #[default]
    Domestic,
    International,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub kind: ShipmentKind,
    pub courier: String,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub destination_country: Option<String>,
}

impl BookingForm {
    /// Returns the courier and the route to book. International shipments
    /// get the country appended to the destination.
    pub fn validate(&self) -> Result<(String, ShipmentDetails), ValidationError> {
        let mut destination = self.destination.trim().to_string();
        if self.kind == ShipmentKind::International {
            let country = self
                .destination_country
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or(ValidationError::MissingDestinationCountry)?;
            destination = format!("{destination}, {country}");
        }
        if is_blank(&self.origin) || is_blank(&self.destination) {
            return Err(ValidationError::MissingAddresses);
        }
        let courier = BOOKABLE_COURIERS
            .iter()
            .find(|c| c.eq_ignore_ascii_case(self.courier.trim()))
            .ok_or_else(|| ValidationError::UnknownCourier(self.courier.clone()))?;
        Ok((
            courier.to_string(),
            ShipmentDetails {
                origin: self.origin.trim().to_string(),
                destination,
            },
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusForm {
    pub status: String,
    pub location: String,
}

impl StatusForm {
    pub fn validate(&self) -> Result<(&str, &str), ValidationError> {
        if is_blank(&self.status) || is_blank(&self.location) {
            return Err(ValidationError::MissingStatusFields);
        }
        Ok((self.status.trim(), self.location.trim()))
    }
}

pub fn validate_tracking_id(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingTrackingId);
    }
    Ok(trimmed)
}
