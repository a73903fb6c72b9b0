use serde::Serialize;

use super::page::Page;
use crate::store::{Role, Shipment, User};

pub const ACCESS_DENIED: &str =
    "Access denied. You do not have permission to view this shipment.";

/// Who is looking at a shipment: enough of a user to decide access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: String,
    pub role: Role,
}

impl Viewer {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Viewer {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            role: user.role,
        }
    }
}

/// Signed-in customers only see their own shipments. Admins see everything
/// and anonymous visitors may look up any shipment by id.
pub fn can_view_shipment(viewer: Option<&Viewer>, shipment: &Shipment) -> bool {
    match viewer {
        Some(v) => v.is_admin() || shipment.user_id == v.user_id,
        None => true,
    }
}

/// Where the "back" button on the shipment detail page leads.
pub fn back_destination(viewer: Option<&Viewer>) -> Page {
    match viewer {
        Some(v) if v.is_admin() => Page::Admin,
        Some(_) => Page::Dashboard,
        None => Page::Home,
    }
}

/// Badge colour family for a free-form shipment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Delivered,
    InTransit,
    OutForDelivery,
    Booked,
    Attention,
}

impl StatusTone {
    pub fn of(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "delivered" => StatusTone::Delivered,
            "in transit" => StatusTone::InTransit,
            "out for delivery" => StatusTone::OutForDelivery,
            "booked" => StatusTone::Booked,
            _ => StatusTone::Attention,
        }
    }
}

/// Where a page that needs an email goes when it was opened without one.
pub fn missing_email_fallback(page: &Page) -> Option<Page> {
    match page {
        Page::VerifyEmail { email: None } => Some(Page::Signup),
        Page::ResetPasswordSent { email: None } => Some(Page::ForgotPassword),
        _ => None,
    }
}
