use serde::Serialize;

/// Every screen the shell can show. Pages that need context carry it in
/// their own variant instead of a shared untyped payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Home,
    Login,
    Signup,
    VerifyEmail { email: Option<String> },
    ForgotPassword,
    ResetPasswordSent { email: Option<String> },
    ResetPassword,
    About,
    ContactUs,
    Dashboard,
    Profile,
    BookShipment,
    Admin,
    ShipmentDetail { shipment_id: Option<String> },
    NotFound,
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Login => "login",
            Page::Signup => "signup",
            Page::VerifyEmail { .. } => "verify-email",
            Page::ForgotPassword => "forgot-password",
            Page::ResetPasswordSent { .. } => "reset-password-sent",
            Page::ResetPassword => "reset-password",
            Page::About => "about",
            Page::ContactUs => "contact-us",
            Page::Dashboard => "dashboard",
            Page::Profile => "profile",
            Page::BookShipment => "book-shipment",
            Page::Admin => "admin",
            Page::ShipmentDetail { .. } => "shipment-detail",
            Page::NotFound => "not-found",
        }
    }

    /// Builds a page from its route name. `param` feeds the pages that take
    /// one (an email or a shipment id) and is ignored by the rest. Unknown
    /// names map to [`Page::NotFound`].
    pub fn from_route(name: &str, param: Option<String>) -> Self {
        let param = param.filter(|p| !p.trim().is_empty());
        match name {
            "home" => Page::Home,
            "login" => Page::Login,
            "signup" => Page::Signup,
            "verify-email" => Page::VerifyEmail { email: param },
            "forgot-password" => Page::ForgotPassword,
            "reset-password-sent" => Page::ResetPasswordSent { email: param },
            "reset-password" => Page::ResetPassword,
            "about" => Page::About,
            "contact-us" => Page::ContactUs,
            "dashboard" => Page::Dashboard,
            "profile" => Page::Profile,
            "book-shipment" => Page::BookShipment,
            "admin" => Page::Admin,
            "shipment-detail" => Page::ShipmentDetail { shipment_id: param },
            _ => Page::NotFound,
        }
    }

    pub fn shipment_detail(shipment_id: impl Into<String>) -> Self {
        Page::ShipmentDetail {
            shipment_id: Some(shipment_id.into()),
        }
    }

    pub fn verify_email(email: impl Into<String>) -> Self {
        Page::VerifyEmail {
            email: Some(email.into()),
        }
    }

    pub fn reset_password_sent(email: impl Into<String>) -> Self {
        Page::ResetPasswordSent {
            email: Some(email.into()),
        }
    }
}
