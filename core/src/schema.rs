//! Schema registry for the events domain.
//!
//! Every entity the service knows about is described here once: the attribute
//! names a request may carry, the table the store keeps it in, and the column
//! that identifies a single record. Validation, projection and the dispatcher
//! all read from this registry instead of carrying their own field lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Attributes recognised for venues.
const VENUE_ATTRIBUTES: &[&str] = &[
    "user_id",
    "venue_name",
    "email",
    "street_address",
    "city",
    "postcode",
    "bio",
];

/// Attributes recognised for artists.
const ARTIST_ATTRIBUTES: &[&str] = &[
    "user_id",
    "artist_name",
    "email",
    "street_address",
    "city",
    "postcode",
    "genres",
    "spotify_artist_id",
    "bio",
];

/// Attributes recognised for attendees.
const ATTENDEE_ATTRIBUTES: &[&str] = &[
    "user_id",
    "first_name",
    "last_name",
    "email",
    "street_address",
    "city",
    "postcode",
    "bio",
];

/// Attributes recognised for events.
const EVENT_ATTRIBUTES: &[&str] = &[
    "event_id",
    "venue_id",
    "event_name",
    "date_time",
    "total_tickets",
    "sold_tickets",
    "artist_ids",
];

/// Attributes recognised for tickets.
const TICKET_ATTRIBUTES: &[&str] = &[
    "ticket_id",
    "event_id",
    "attendee_id",
    "price",
    "redeemed",
    "status",
];

/// One of the five entity kinds stored by the service.
///
/// Serialized in lowercase (`"venue"`, `"event"`, ...) to match the
/// `object_type` field of inbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    /// A venue account.
    Venue,
    /// An artist account.
    Artist,
    /// An attendee account.
    Attendee,
    /// A scheduled event at a venue.
    Event,
    /// A ticket held by an attendee for an event.
    Ticket,
}

impl Entity {
    /// Every entity, in registry order.
    pub const ALL: [Self; 5] = [
        Self::Venue,
        Self::Artist,
        Self::Attendee,
        Self::Event,
        Self::Ticket,
    ];

    /// Attribute names a request may carry for this entity.
    #[must_use]
    pub const fn attributes(self) -> &'static [&'static str] {
        match self {
            Self::Venue => VENUE_ATTRIBUTES,
            Self::Artist => ARTIST_ATTRIBUTES,
            Self::Attendee => ATTENDEE_ATTRIBUTES,
            Self::Event => EVENT_ATTRIBUTES,
            Self::Ticket => TICKET_ATTRIBUTES,
        }
    }

    /// Whether `name` is a recognised attribute of this entity.
    #[must_use]
    pub fn recognises(self, name: &str) -> bool {
        self.attributes().contains(&name)
    }

    /// Lowercase name used in requests (`object_type`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Artist => "artist",
            Self::Attendee => "attendee",
            Self::Event => "event",
            Self::Ticket => "ticket",
        }
    }

    /// Capitalised name used in user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Venue => "Venue",
            Self::Artist => "Artist",
            Self::Attendee => "Attendee",
            Self::Event => "Event",
            Self::Ticket => "Ticket",
        }
    }

    /// Table holding records of this entity.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Venue => "venues",
            Self::Artist => "artists",
            Self::Attendee => "attendees",
            Self::Event => "events",
            Self::Ticket => "tickets",
        }
    }

    /// Column that identifies a single record.
    ///
    /// Account-type entities are keyed by the owning user's id.
    #[must_use]
    pub const fn key_column(self) -> &'static str {
        match self {
            Self::Venue | Self::Artist | Self::Attendee => "user_id",
            Self::Event => "event_id",
            Self::Ticket => "ticket_id",
        }
    }

    /// Venue, artist and attendee represent user accounts.
    #[must_use]
    pub const fn is_account(self) -> bool {
        matches!(self, Self::Venue | Self::Artist | Self::Attendee)
    }

    /// Comma-separated list of every recognised attribute, for a full select.
    #[must_use]
    pub fn all_columns(self) -> String {
        self.attributes().join(",")
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an `object_type` names no known entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown object type '{0}'")]
pub struct UnknownEntity(pub String);

impl FromStr for Entity {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entity| entity.name() == s)
            .ok_or_else(|| UnknownEntity(s.to_string()))
    }
}
