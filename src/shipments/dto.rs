use serde::Serialize;

use crate::session::{views::StatusTone, Page};
use crate::store::{Shipment, StatusUpdate};

/// One row of the dashboard / admin shipment tables.
#[derive(Debug, Serialize)]
pub struct ShipmentListItem {
    pub id: String,
    pub tracking_id: String,
    pub courier: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub tone: StatusTone,
    pub last_update: Option<StatusUpdate>,
}

impl From<Shipment> for ShipmentListItem {
    fn from(s: Shipment) -> Self {
        let last_update = s.latest_update().cloned();
        Self {
            tone: StatusTone::of(&s.status),
            id: s.id,
            tracking_id: s.tracking_id,
            courier: s.courier,
            origin: s.origin,
            destination: s.destination,
            status: s.status,
            last_update,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShipmentView {
    pub shipment: Shipment,
    pub tone: StatusTone,
    /// Target of the "back" button.
    pub back: Page,
}

#[derive(Debug, Serialize)]
pub struct BookedShipmentResponse {
    pub message: String,
    pub shipment: Shipment,
    pub next: Page,
}
