//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /        -> list        (any authenticated user)
/// POST   /        -> create      (admin)
/// GET    /{id}    -> get_by_id   (any authenticated user)
/// PUT    /{id}    -> update      (admin)
/// DELETE /{id}    -> delete      (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
}
