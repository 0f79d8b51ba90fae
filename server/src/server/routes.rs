//! Router configuration.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::{accounts, events, gigs, records};
use axum::{
    Router,
    routing::{get, post},
};
use motive_web::correlation_id_layer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Every API route is a `POST` with an operation request body:
///
/// | Path | Operation |
/// |---|---|
/// | `/api/dispatch` | `function` taken from the body |
/// | `/api/create`, `/api/update`, `/api/delete`, `/api/get` | CRUD |
/// | `/api/events/for-venue`, `/for-artist`, `/for-attendee`, `/in-city` | event lookups |
/// | `/api/cities/in-country` | cities of a country |
/// | `/api/gigs/apply`, `/accept`, `/reject` | gig workflow |
/// | `/api/accounts/lookup` | account by email |
///
/// `GET /health` and `GET /ready` sit outside `/api`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dispatch", post(records::dispatch))
        .route("/create", post(records::create))
        .route("/update", post(records::update))
        .route("/delete", post(records::delete))
        .route("/get", post(records::get))
        .route("/events/for-venue", post(events::for_venue))
        .route("/events/for-artist", post(events::for_artist))
        .route("/events/for-attendee", post(events::for_attendee))
        .route("/events/in-city", post(events::in_city))
        .route("/cities/in-country", post(events::cities_in_country))
        .route("/gigs/apply", post(gigs::apply))
        .route("/gigs/accept", post(gigs::accept))
        .route("/gigs/reject", post(gigs::reject))
        .route("/accounts/lookup", post(accounts::lookup));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
