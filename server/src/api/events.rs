//! Relational event lookups.
//!
//! The body's `identifier` is the relation key: venue user id, artist id,
//! attendee id, city name or country name. Zero matches is a success with an
//! empty `data` array.

use axum::extract::State;
use motive_core::{Dispatcher, Relation, Request};
use motive_web::{JsonPayload, OutcomeResponse};

async fn lookup(dispatcher: &Dispatcher, relation: Relation, request: &Request) -> OutcomeResponse {
    dispatcher.relation(relation, request).await.into()
}

/// `POST /api/events/for-venue`
pub async fn for_venue(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    lookup(&dispatcher, Relation::EventsForVenue, &request).await
}

/// `POST /api/events/for-artist`
pub async fn for_artist(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    lookup(&dispatcher, Relation::EventsForArtist, &request).await
}

/// `POST /api/events/for-attendee`
pub async fn for_attendee(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    lookup(&dispatcher, Relation::EventsForAttendee, &request).await
}

/// `POST /api/events/in-city`
pub async fn in_city(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    lookup(&dispatcher, Relation::EventsInCity, &request).await
}

/// `POST /api/cities/in-country`
pub async fn cities_in_country(
    State(dispatcher): State<Dispatcher>,
    JsonPayload(request): JsonPayload<Request>,
) -> OutcomeResponse {
    lookup(&dispatcher, Relation::CitiesInCountry, &request).await
}
