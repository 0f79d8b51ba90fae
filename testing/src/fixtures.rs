//! Realistic rows and requests for tests.

use motive_core::{Entity, Function, Request};
use serde_json::{Value, json};

/// A row as the store would return it for `entity`.
#[must_use]
pub fn row(entity: Entity) -> Value {
    match entity {
        Entity::Venue => json!({
            "user_id": "venue123",
            "venue_name": "The Jazz Cafe",
            "email": "bookings@jazzcafe.example",
            "street_address": "5 Parkway",
            "city": "London",
            "postcode": "NW1 7PG",
            "bio": "Live music since 1990."
        }),
        Entity::Artist => json!({
            "user_id": "artist42",
            "artist_name": "The Night Owls",
            "email": "owls@example.com",
            "street_address": "12 Camden Road",
            "city": "London",
            "postcode": "NW1 9DP",
            "genres": ["jazz", "soul"],
            "spotify_artist_id": "4Z8W4fKeB5YxbusRsdQVPb",
            "bio": "Four-piece from north London."
        }),
        Entity::Attendee => json!({
            "user_id": "attendee7",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "street_address": "1 St James's Square",
            "city": "London",
            "postcode": "SW1Y 4JU",
            "bio": null
        }),
        Entity::Event => json!({
            "event_id": "123",
            "venue_id": "venue123",
            "event_name": "Test Event",
            "date_time": "2024-03-01T20:00:00Z",
            "total_tickets": 200,
            "sold_tickets": 0,
            "artist_ids": ["artist42"]
        }),
        Entity::Ticket => json!({
            "ticket_id": "t-1",
            "event_id": "123",
            "attendee_id": "attendee7",
            "price": 15,
            "redeemed": false,
            "status": "valid"
        }),
    }
}

/// Create request carrying every attribute of [`row`] except generated keys.
#[must_use]
pub fn create_request(entity: Entity) -> Request {
    let mut attributes = match row(entity) {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    if !entity.is_account() {
        attributes.remove(entity.key_column());
    }
    Request::for_entity(entity)
        .function(Function::Create)
        .attributes(attributes)
}

/// Request addressing the record of [`row`] by key.
#[must_use]
pub fn key_request(entity: Entity, function: Function) -> Request {
    let key = row(entity)
        .get(entity.key_column())
        .cloned()
        .unwrap_or(Value::Null);
    Request::for_entity(entity).function(function).identifier(key)
}
