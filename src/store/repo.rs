use std::collections::HashSet;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::error::StoreError;
use super::latency::{Latency, Operation};
use super::repo_types::{
    Role, Shipment, ShipmentDetails, StatusUpdate, User, BOOKED_STATUS, INITIAL_UPDATE_STATUS,
};
use super::seed::Seed;
use super::tracking::{generate_tracking_id, is_tracking_id};

/// In-memory stand-in for the backend API. Every call waits out the
/// configured latency before touching the data.
pub struct MockStore {
    data: RwLock<StoreData>,
    latency: Latency,
}

struct StoreData {
    users: Vec<User>,         // insertion order
    shipments: Vec<Shipment>, // insertion order
    next_user_id: u64,
    next_shipment_id: u64,
}

impl StoreData {
    fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    fn user_exists(&self, id: &str) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn shipment_mut(&mut self, id: &str) -> Option<&mut Shipment> {
        self.shipments.iter_mut().find(|s| s.id == id)
    }
}

/// Next free numeric id after whatever the seed already uses.
fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl MockStore {
    /// Takes ownership of the seed after normalizing its emails. Duplicate
    /// ids or emails and shipments owned by unknown users are rejected.
    pub fn new(seed: Seed, latency: Latency) -> Result<Self, StoreError> {
        let Seed {
            mut users,
            mut shipments,
        } = seed;

        let mut user_ids = HashSet::new();
        let mut emails = HashSet::new();
        for user in &mut users {
            user.email = normalize_email(&user.email);
            if !user_ids.insert(user.id.clone()) {
                return Err(StoreError::InvalidSeed(format!("duplicate user id {}", user.id)));
            }
            if !emails.insert(user.email.clone()) {
                return Err(StoreError::InvalidSeed(format!(
                    "duplicate email {}",
                    user.email
                )));
            }
        }

        let mut shipment_ids = HashSet::new();
        for shipment in &mut shipments {
            if !shipment_ids.insert(shipment.id.clone()) {
                return Err(StoreError::InvalidSeed(format!(
                    "duplicate shipment id {}",
                    shipment.id
                )));
            }
            if !user_ids.contains(&shipment.user_id) {
                return Err(StoreError::InvalidSeed(format!(
                    "shipment {} belongs to unknown user {}",
                    shipment.id, shipment.user_id
                )));
            }
            shipment.sort_updates();
        }

        let next_user_id = next_id(users.iter().map(|u| u.id.as_str()));
        let next_shipment_id = next_id(shipments.iter().map(|s| s.id.as_str()));
        debug!(users = users.len(), shipments = shipments.len(), "seed accepted");
        Ok(Self {
            data: RwLock::new(StoreData {
                users,
                shipments,
                next_user_id,
                next_shipment_id,
            }),
            latency,
        })
    }

    /// Password content is not checked, only that one was given.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, StoreError> {
        self.latency.wait(Operation::Login).await;
        let email = normalize_email(email);
        let data = self.data.read().await;
        match data.user_by_email(&email) {
            Some(user) if !password.is_empty() => {
                debug!(user_id = %user.id, "credentials accepted");
                Ok(user.clone())
            }
            _ => Err(StoreError::InvalidCredentials),
        }
    }

    pub async fn signup(&self, name: &str, email: &str) -> Result<(), StoreError> {
        self.latency.wait(Operation::Signup).await;
        let email = normalize_email(email);
        let mut data = self.data.write().await;
        if data.user_by_email(&email).is_some() {
            return Err(StoreError::EmailTaken);
        }
        let id = data.next_user_id.to_string();
        data.next_user_id += 1;
        info!(user_id = %id, %email, "account created");
        data.users.push(User {
            id,
            name: name.trim().to_string(),
            email,
            role: Role::User,
        });
        Ok(())
    }

    /// Only the display name is taken from `user`; email and role stay as
    /// stored.
    pub async fn update_user_profile(&self, user: &User) -> Result<User, StoreError> {
        self.latency.wait(Operation::UpdateProfile).await;
        let mut data = self.data.write().await;
        let stored = data
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::UserNotFound)?;
        stored.name = user.name.trim().to_string();
        info!(user_id = %stored.id, "profile updated");
        Ok(stored.clone())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.latency.wait(Operation::GetUser).await;
        let data = self.data.read().await;
        data.users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    pub async fn get_user_shipments(&self, user_id: &str) -> Vec<Shipment> {
        self.latency.wait(Operation::UserShipments).await;
        let data = self.data.read().await;
        data.shipments
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn get_shipment_by_id(&self, shipment_id: &str) -> Result<Shipment, StoreError> {
        self.latency.wait(Operation::GetShipment).await;
        let data = self.data.read().await;
        data.shipments
            .iter()
            .find(|s| s.id == shipment_id)
            .cloned()
            .ok_or(StoreError::ShipmentNotFound)
    }

    pub async fn get_shipment_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Shipment, StoreError> {
        self.latency.wait(Operation::GetShipment).await;
        let tracking_id = tracking_id.trim().to_uppercase();
        let data = self.data.read().await;
        data.shipments
            .iter()
            .find(|s| s.tracking_id == tracking_id)
            .cloned()
            .ok_or(StoreError::ShipmentNotFound)
    }

    pub async fn book_shipment(
        &self,
        user_id: &str,
        courier: &str,
        details: ShipmentDetails,
    ) -> Result<Shipment, StoreError> {
        self.latency.wait(Operation::BookShipment).await;
        let mut data = self.data.write().await;
        if !data.user_exists(user_id) {
            return Err(StoreError::UserNotFound);
        }
        let id = data.next_shipment_id.to_string();
        data.next_shipment_id += 1;

        let ShipmentDetails {
            origin,
            destination,
        } = details;
        let shipment = Shipment {
            id,
            user_id: user_id.to_string(),
            tracking_id: generate_tracking_id(&mut rand::thread_rng()),
            courier: courier.to_string(),
            updates: vec![StatusUpdate {
                timestamp: OffsetDateTime::now_utc(),
                status: INITIAL_UPDATE_STATUS.to_string(),
                location: origin.clone(),
            }],
            origin,
            destination,
            status: BOOKED_STATUS.to_string(),
        };
        info!(
            shipment_id = %shipment.id,
            tracking_id = %shipment.tracking_id,
            %user_id,
            "shipment booked"
        );
        debug_assert!(is_tracking_id(&shipment.tracking_id));
        data.shipments.push(shipment.clone());
        Ok(shipment)
    }

    pub async fn get_all_users(&self) -> Vec<User> {
        self.latency.wait(Operation::AllUsers).await;
        self.data.read().await.users.clone()
    }

    pub async fn get_all_shipments(&self) -> Vec<Shipment> {
        self.latency.wait(Operation::AllShipments).await;
        self.data.read().await.shipments.clone()
    }

    /// Records a new status. The new entry always ends up first: its
    /// timestamp is never older than the current newest entry.
    pub async fn update_shipment_status(
        &self,
        shipment_id: &str,
        status: &str,
        location: &str,
    ) -> Result<Shipment, StoreError> {
        self.latency.wait(Operation::UpdateStatus).await;
        let mut data = self.data.write().await;
        let shipment = data
            .shipment_mut(shipment_id)
            .ok_or(StoreError::ShipmentNotFound)?;

        let now = OffsetDateTime::now_utc();
        let timestamp = shipment
            .latest_update()
            .map_or(now, |latest| latest.timestamp.max(now));
        shipment.status = status.to_string();
        shipment.updates.insert(
            0,
            StatusUpdate {
                timestamp,
                status: status.to_string(),
                location: location.to_string(),
            },
        );
        shipment.sort_updates();
        info!(%shipment_id, %status, %location, "shipment status updated");
        Ok(shipment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store() -> MockStore {
        MockStore::new(Seed::demo(OffsetDateTime::now_utc()), Latency::none()).unwrap()
    }

    fn route(origin: &str, destination: &str) -> ShipmentDetails {
        ShipmentDetails {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    #[tokio::test]
    async fn login_returns_seeded_admin_for_any_password() {
        let user = store().login("admin@test.com", "anything").await.unwrap();
        assert_eq!(user.name, "Jane Admin");
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn login_rejects_unknown_email_and_empty_password() {
        let store = store();
        let err = store.login("missing@test.com", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password.");
        let err = store.login("john@test.com", "").await.unwrap_err();
        assert_eq!(err, StoreError::InvalidCredentials);
    }

    #[tokio::test]
    async fn signup_then_login_succeeds() {
        let store = store();
        store.signup("New Person", "New@Example.com").await.unwrap();
        let user = store.login("new@example.com", "pw").await.unwrap();
        assert_eq!(user.name, "New Person");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.id, "3");
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let err = store().signup("John", "john@test.com").await.unwrap_err();
        assert_eq!(err.to_string(), "An account with this email already exists.");
    }

    #[tokio::test]
    async fn update_profile_changes_name_only() {
        let store = store();
        let mut user = store.login("john@test.com", "pw").await.unwrap();
        user.name = "Johnny".into();
        user.role = Role::Admin;
        user.email = "other@test.com".into();
        let updated = store.update_user_profile(&user).await.unwrap();
        assert_eq!(updated.name, "Johnny");
        assert_eq!(updated.role, Role::User);
        assert_eq!(updated.email, "john@test.com");
        assert_eq!(store.get_user("1").await.unwrap().name, "Johnny");
    }

    #[tokio::test]
    async fn update_profile_for_unknown_user_fails() {
        let ghost = User {
            id: "99".into(),
            name: "Ghost".into(),
            email: "ghost@test.com".into(),
            role: Role::User,
        };
        let err = store().update_user_profile(&ghost).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found.");
    }

    #[tokio::test]
    async fn user_shipments_are_filtered_in_insertion_order() {
        let store = store();
        store.book_shipment("2", "DHL", route("A", "B")).await.unwrap();
        store.book_shipment("1", "UPS", route("C", "D")).await.unwrap();

        let mine = store.get_user_shipments("1").await;
        let ids: Vec<_> = mine.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "5"]);

        let all = store.get_all_shipments().await;
        let expected: Vec<_> = all.into_iter().filter(|s| s.user_id == "1").collect();
        assert_eq!(mine, expected);
        assert!(store.get_user_shipments("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn booking_creates_a_single_initial_update() {
        let store = store();
        let shipment = store.book_shipment("1", "DHL", route("A", "B")).await.unwrap();
        assert_eq!(shipment.status, "Booked");
        assert!(is_tracking_id(&shipment.tracking_id));
        assert_eq!(shipment.updates.len(), 1);
        assert_eq!(shipment.updates[0].status, "Shipment information received");
        assert_eq!(shipment.updates[0].location, "A");
        assert_eq!(store.get_shipment_by_id(&shipment.id).await.unwrap(), shipment);
    }

    #[tokio::test]
    async fn booking_for_unknown_user_fails() {
        let err = store()
            .book_shipment("42", "DHL", route("A", "B"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::UserNotFound);
    }

    #[tokio::test]
    async fn status_update_goes_first_and_keeps_order() {
        let store = store();
        let shipment = store
            .update_shipment_status("3", "Delivered", "Rome, Italy")
            .await
            .unwrap();
        assert_eq!(shipment.status, "Delivered");
        assert_eq!(shipment.updates.len(), 3);
        assert_eq!(shipment.updates[0].status, "Delivered");
        assert_eq!(shipment.updates[0].location, "Rome, Italy");
        assert!(shipment
            .updates
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn status_update_beats_future_dated_history() {
        let mut seed = Seed::demo(OffsetDateTime::now_utc());
        seed.shipments[0].updates[0].timestamp =
            OffsetDateTime::now_utc() + time::Duration::hours(1);
        let store = MockStore::new(seed, Latency::none()).unwrap();
        let shipment = store.update_shipment_status("1", "Held", "Customs").await.unwrap();
        assert_eq!(shipment.updates[0].status, "Held");
    }

    #[tokio::test]
    async fn missing_shipment_is_reported() {
        let store = store();
        assert_eq!(
            store.get_shipment_by_id("404").await.unwrap_err(),
            StoreError::ShipmentNotFound
        );
        assert_eq!(
            store.update_shipment_status("404", "x", "y").await.unwrap_err(),
            StoreError::ShipmentNotFound
        );
    }

    #[tokio::test]
    async fn tracking_lookup_is_case_insensitive() {
        let shipment = store().get_shipment_by_tracking_id(" cm987654321 ").await.unwrap();
        assert_eq!(shipment.id, "2");
    }

    #[tokio::test]
    async fn independent_instances_do_not_share_state() {
        let a = store();
        let b = store();
        a.signup("Only A", "a@test.com").await.unwrap();
        assert_eq!(a.get_all_users().await.len(), 3);
        assert_eq!(b.get_all_users().await.len(), 2);
    }

    #[tokio::test]
    async fn empty_seed_starts_ids_at_one() {
        let store = MockStore::new(Seed::empty(), Latency::none()).unwrap();
        store.signup("First", "first@test.com").await.unwrap();
        assert_eq!(store.get_all_users().await[0].id, "1");
    }

    #[tokio::test]
    async fn seeded_emails_are_normalized() {
        let mut seed = Seed::demo(OffsetDateTime::now_utc());
        seed.users[0].email = " John@Test.com".into();
        let store = MockStore::new(seed, Latency::none()).unwrap();

        let user = store.login("John@Test.com", "pw").await.unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.email, "john@test.com");
        assert_eq!(
            store.signup("X", "john@test.com").await.unwrap_err(),
            StoreError::EmailTaken
        );
    }

    #[test]
    fn seed_with_clashing_emails_is_rejected() {
        let mut seed = Seed::demo(OffsetDateTime::now_utc());
        seed.users[1].email = "JOHN@test.com".into();
        let err = MockStore::new(seed, Latency::none()).err().unwrap();
        assert_eq!(
            err,
            StoreError::InvalidSeed("duplicate email john@test.com".into())
        );
    }

    #[test]
    fn seed_with_orphan_shipment_is_rejected() {
        let mut seed = Seed::demo(OffsetDateTime::now_utc());
        seed.shipments[0].user_id = "999".into();
        let err = MockStore::new(seed, Latency::none()).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid seed data: shipment 1 belongs to unknown user 999"
        );
    }

    #[test]
    fn seed_with_duplicate_ids_is_rejected() {
        let mut seed = Seed::demo(OffsetDateTime::now_utc());
        seed.shipments[1].id = "1".into();
        assert!(matches!(
            MockStore::new(seed, Latency::none()),
            Err(StoreError::InvalidSeed(_))
        ));

        let mut seed = Seed::demo(OffsetDateTime::now_utc());
        seed.users[1].id = "1".into();
        assert!(matches!(
            MockStore::new(seed, Latency::none()),
            Err(StoreError::InvalidSeed(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn calls_wait_for_simulated_latency() {
        let store = MockStore::new(Seed::demo(OffsetDateTime::now_utc()), Latency::simulated()).unwrap();
        let start = tokio::time::Instant::now();
        store.book_shipment("1", "UPS", route("A", "B")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
