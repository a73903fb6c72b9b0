use time::{Duration, OffsetDateTime};

use super::repo_types::{Role, Shipment, StatusUpdate, User};

/// Initial contents handed to [`MockStore::new`](super::MockStore::new).
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub users: Vec<User>,
    pub shipments: Vec<Shipment>,
}

impl Seed {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Two accounts (one admin) and three shipments, with history relative
    /// to `now`.
    pub fn demo(now: OffsetDateTime) -> Self {
        let days_ago = |days: i64| now - Duration::days(days);
        let update = |timestamp, location: &str, status: &str| StatusUpdate {
            timestamp,
            status: status.into(),
            location: location.into(),
        };

        let users = vec![
            user("1", "John Doe", "john@test.com", Role::User),
            user("2", "Jane Admin", "admin@test.com", Role::Admin),
        ];

        let shipments = vec![
            shipment(
                ("1", "1"),
                "CM123456789",
                "FedEx",
                ("New York, NY", "Los Angeles, CA"),
                "In Transit",
                vec![
                    update(days_ago(3), "New York, NY", "Package picked up"),
                    update(days_ago(1), "Chicago, IL", "Arrived at hub"),
                ],
            ),
            shipment(
                ("2", "1"),
                "CM987654321",
                "DHL",
                ("London, UK", "Paris, France"),
                "Delivered",
                vec![
                    update(days_ago(4), "London, UK", "Package picked up"),
                    update(days_ago(2), "Paris, France", "Delivered"),
                ],
            ),
            shipment(
                ("3", "2"),
                "CM555555555",
                "UPS",
                ("Berlin, Germany", "Rome, Italy"),
                "Out for Delivery",
                vec![
                    update(days_ago(2), "Berlin, Germany", "Package picked up"),
                    update(now, "Rome, Italy", "Out for Delivery"),
                ],
            ),
        ];

        Self { users, shipments }
    }
}

fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        role,
    }
}

fn shipment(
    (id, user_id): (&str, &str),
    tracking_id: &str,
    courier: &str,
    (origin, destination): (&str, &str),
    status: &str,
    updates: Vec<StatusUpdate>,
) -> Shipment {
    let mut shipment = Shipment {
        id: id.into(),
        user_id: user_id.into(),
        tracking_id: tracking_id.into(),
        courier: courier.into(),
        origin: origin.into(),
        destination: destination.into(),
        status: status.into(),
        updates,
    };
    shipment.sort_updates();
    shipment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_shipments_reference_seeded_users() {
        let seed = Seed::demo(OffsetDateTime::now_utc());
        for s in &seed.shipments {
            assert!(seed.users.iter().any(|u| u.id == s.user_id), "{}", s.id);
        }
    }

    #[test]
    fn demo_histories_are_newest_first() {
        let seed = Seed::demo(OffsetDateTime::now_utc());
        let first = &seed.shipments[0];
        assert_eq!(first.updates[0].status, "Arrived at hub");
        assert_eq!(first.updates[1].status, "Package picked up");
    }
}
