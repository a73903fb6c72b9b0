//! Mock data service: users and shipments in process memory, reached
//! through delayed async calls that mimic a remote API.

mod error;
mod latency;
mod repo;
pub mod repo_types;
mod seed;
pub mod tracking;

pub use error::StoreError;
pub use latency::{Latency, Operation};
pub use repo::MockStore;
pub use repo_types::{Role, Shipment, ShipmentDetails, StatusUpdate, User};
pub use seed::Seed;
