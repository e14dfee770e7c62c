pub mod form;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn form_routes() -> Router<SharedState> {
    Router::new()
        .route("/Form", post(form::submit))
        .route("/Display", get(form::display))
}
