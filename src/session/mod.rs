//! Client-side shell state: which page is visible, who is signed in, and
//! the rules that decide whether a page may be shown.

mod controller;
pub mod handlers;
mod page;
pub mod polling;
pub mod views;

pub use controller::{check_access, Access, Headless, Rendered, SessionController, Viewport};
pub use page::Page;
pub use polling::{PollEvent, PollHandle, ShipmentPoller};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::page_routes()
}
