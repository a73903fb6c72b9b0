//! CourierMate: session/navigation shell and an in-memory mock backend for
//! a parcel tracking app, served over a small JSON API.

pub mod admin;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod session;
pub mod shipments;
pub mod state;
pub mod store;
