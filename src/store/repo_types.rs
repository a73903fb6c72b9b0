use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Account role. Only admins may manage shipments and list users.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// User record held by the mock store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,    // unique, assigned from a counter
    pub name: String,  // display name, the only mutable field
    pub email: String, // unique, stored lowercase
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// One entry of a shipment's tracking history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub status: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shipment {
    pub id: String,
    pub user_id: String,
    pub tracking_id: String,
    pub courier: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    /// Newest first.
    pub updates: Vec<StatusUpdate>,
}

impl Shipment {
    /// Stable sort, so among equal timestamps earlier entries stay ahead.
    pub(crate) fn sort_updates(&mut self) {
        self.updates.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }

    pub fn latest_update(&self) -> Option<&StatusUpdate> {
        self.updates.first()
    }
}

/// Route of a new shipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShipmentDetails {
    pub origin: String,
    pub destination: String,
}

pub const BOOKED_STATUS: &str = "Booked";
pub const INITIAL_UPDATE_STATUS: &str = "Shipment information received";

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn update(offset_hours: i64, status: &str) -> StatusUpdate {
        StatusUpdate {
            timestamp: OffsetDateTime::UNIX_EPOCH + Duration::hours(offset_hours),
            status: status.into(),
            location: "Hub".into(),
        }
    }

    #[test]
    fn sort_updates_orders_newest_first() {
        let mut shipment = Shipment {
            id: "1".into(),
            user_id: "1".into(),
            tracking_id: "CM100000000".into(),
            courier: "UPS".into(),
            origin: "A".into(),
            destination: "B".into(),
            status: "In Transit".into(),
            updates: vec![update(1, "picked up"), update(5, "out"), update(3, "hub")],
        };
        shipment.sort_updates();
        let order: Vec<_> = shipment.updates.iter().map(|u| u.status.as_str()).collect();
        assert_eq!(order, ["out", "hub", "picked up"]);
        assert_eq!(shipment.latest_update().unwrap().status, "out");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn status_update_timestamp_is_rfc3339() {
        let json = serde_json::to_string(&update(0, "x")).unwrap();
        assert!(json.contains("1970-01-01T00:00:00Z"));
    }
}
