pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::SubmissionStore;
use crate::notify::{NoopNotifier, Notifier, TwilioNotifier};
use crate::state::{AppState, SharedState};

/// Assemble shared state, choosing the SMS notifier from configuration.
pub fn build_state(store: Arc<dyn SubmissionStore>, config: Config) -> SharedState {
    let notifier: Arc<dyn Notifier> = match config.twilio.clone() {
        Some(twilio) => match TwilioNotifier::new(twilio) {
            Ok(notifier) => {
                tracing::info!("Twilio SMS notifications enabled");
                Arc::new(notifier)
            }
            Err(e) => {
                tracing::warn!("SMS notifications not available: {e}");
                Arc::new(NoopNotifier)
            }
        },
        None => {
            tracing::info!("Twilio not configured; SMS notifications disabled");
            Arc::new(NoopNotifier)
        }
    };

    Arc::new(AppState {
        store,
        notifier,
        config,
    })
}

pub fn build_app(state: SharedState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        .merge(routes::form_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
