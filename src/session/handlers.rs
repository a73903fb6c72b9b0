use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{instrument, warn};

use super::{views::missing_email_fallback, Headless, Page, Rendered, SessionController};
use crate::{auth::services::MaybeAuthUser, error::Rejection, state::AppState};

pub fn page_routes() -> Router<AppState> {
    Router::new().route("/pages/:page", get(resolve_page))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Email or shipment id for the pages that take one.
    pub param: Option<String>,
}

/// GET /pages/:page?param=
/// Answers what the shell would actually show for a page request by the
/// caller, after the access gate and the email-page fallbacks.
#[instrument(skip(state))]
pub async fn resolve_page(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(page): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Rendered>, Rejection> {
    let user = match caller {
        Some(caller) => Some(state.store.get_user(&caller.user_id).await.map_err(|e| {
            warn!(error = %e, user_id = %caller.user_id, "token for unknown user");
            (StatusCode::UNAUTHORIZED, e.to_string())
        })?),
        None => None,
    };

    let requested = Page::from_route(&page, query.param);
    let mut session = SessionController::resume(user, Headless);
    session.navigate(requested.clone());
    let mut rendered = session.render();

    if let Some(fallback) = missing_email_fallback(&rendered.page) {
        session.navigate(fallback);
        rendered = session.render();
    }
    if rendered.page != requested {
        rendered.redirected_from = Some(requested);
    }
    Ok(Json(rendered))
}
