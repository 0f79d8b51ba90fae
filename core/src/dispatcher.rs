//! Operation dispatcher.
//!
//! One generic handler per operation kind, parameterized by the entity
//! schema. Each operation follows the same sequence:
//!
//! ```text
//! Request ──validate──▶ typed input ──▶ StoreCall ──gateway──▶ raw result ──normalize──▶ Outcome
//! ```
//!
//! Validation failures return before the gateway is touched. Gateway errors
//! never escape: they are normalized into [`FailureKind::Exception`].
//!
//! [`FailureKind::Exception`]: crate::outcome::FailureKind::Exception

use crate::gateway::{Filter, StoreCall, StoreGateway};
use crate::normalize::{self, Noun, RawResult};
use crate::outcome::Outcome;
use crate::request::{Function, Request};
use crate::validation::{self, ValidationError};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Relational lookups answered by the store rather than by a key filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Events hosted by a venue.
    EventsForVenue,
    /// Events an artist plays.
    EventsForArtist,
    /// Events an attendee holds tickets for.
    EventsForAttendee,
    /// Events taking place in a city.
    EventsInCity,
    /// Cities of a country.
    CitiesInCountry,
}

impl Relation {
    /// Short name for logs and metrics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EventsForVenue => "events_for_venue",
            Self::EventsForArtist => "events_for_artist",
            Self::EventsForAttendee => "events_for_attendee",
            Self::EventsInCity => "events_in_city",
            Self::CitiesInCountry => "cities_in_country",
        }
    }

    const fn noun(self) -> Noun {
        match self {
            Self::CitiesInCountry => Noun::CITIES,
            _ => Noun::EVENTS,
        }
    }

    /// Store call answering this lookup for `key`.
    ///
    /// Event lookups need joins or array containment and go through remote
    /// procedures; cities are a plain filtered select.
    #[must_use]
    pub fn call(self, key: String) -> StoreCall {
        let (procedure, argument) = match self {
            Self::EventsForVenue => ("get_events_for_venue", "venue_user_id"),
            Self::EventsForArtist => ("get_events_for_artist", "artist_id"),
            Self::EventsForAttendee => ("get_events_for_attendee", "attendee_id"),
            Self::EventsInCity => ("get_events_in_city", "city_name"),
            Self::CitiesInCountry => {
                return StoreCall::Select {
                    table: "cities",
                    columns: "*".to_string(),
                    filter: Filter::eq("country", key),
                };
            }
        };

        let mut args = Map::new();
        args.insert(argument.to_string(), Value::String(key));
        StoreCall::Rpc { procedure, args }
    }
}

/// Gig application workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GigAction {
    /// An artist applies to play an event.
    Apply,
    /// The venue confirms a pending applicant.
    Accept,
    /// The venue turns a pending applicant down.
    Reject,
}

impl GigAction {
    /// Remote procedure performing the action.
    #[must_use]
    pub const fn procedure(self) -> &'static str {
        match self {
            Self::Apply => "apply_for_gig",
            Self::Accept => "accept_gig_application",
            Self::Reject => "reject_gig_application",
        }
    }

    const fn success_message(self) -> &'static str {
        match self {
            Self::Apply => "Gig application submitted successfully.",
            Self::Accept => "Gig application accepted.",
            Self::Reject => "Gig application rejected.",
        }
    }
}

/// Routes requests to store operations.
///
/// Cheap to clone; every clone shares the same gateway.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn StoreGateway>,
}

impl Dispatcher {
    /// Create a dispatcher over `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn StoreGateway>) -> Self {
        Self { gateway }
    }

    /// Shared gateway handle.
    #[must_use]
    pub fn gateway(&self) -> &Arc<dyn StoreGateway> {
        &self.gateway
    }

    /// Route a generic request by its own `function` field.
    pub async fn dispatch(&self, request: &Request) -> Outcome {
        let parsed = request
            .function
            .as_deref()
            .ok_or(ValidationError::MissingField("function"))
            .and_then(str::parse::<Function>);
        match parsed {
            Ok(function) => self.run(function, request).await,
            Err(error) => rejected("dispatch", error),
        }
    }

    /// Run `function` on `request`, ignoring the request's own `function`.
    pub async fn run(&self, function: Function, request: &Request) -> Outcome {
        match function {
            Function::Create => self.create(request).await,
            Function::Update => self.update(request).await,
            Function::Delete => self.delete(request).await,
            Function::Get => self.get(request).await,
        }
    }

    /// Insert a record.
    pub async fn create(&self, request: &Request) -> Outcome {
        let input = match validation::validate_create(request) {
            Ok(input) => input,
            Err(error) => return rejected("create", error),
        };

        let call = StoreCall::Insert {
            table: input.entity.table(),
            row: input.row,
        };
        let outcome = normalize::created(input.entity, self.call(call).await);
        record("create", outcome)
    }

    /// Partially update a record, confirming the stored values.
    ///
    /// An update whose attributes are all null never reaches the store.
    pub async fn update(&self, request: &Request) -> Outcome {
        let input = match validation::validate_update(request) {
            Ok(input) => input,
            Err(error) => return rejected("update", error),
        };

        let call = StoreCall::Update {
            table: input.entity.table(),
            filter: Filter::eq(input.entity.key_column(), input.identifier),
            changes: input.changes.clone(),
        };
        let outcome = normalize::updated(input.entity, &input.changes, self.call(call).await);
        record("update", outcome)
    }

    /// Delete a record.
    pub async fn delete(&self, request: &Request) -> Outcome {
        let input = match validation::validate_delete(request) {
            Ok(input) => input,
            Err(error) => return rejected("delete", error),
        };

        let call = StoreCall::Delete {
            table: input.entity.table(),
            filter: Filter::eq(input.entity.key_column(), input.identifier),
        };
        let outcome = normalize::deleted(input.entity, self.call(call).await);
        record("delete", outcome)
    }

    /// Read one record by key, projecting the flagged attributes.
    pub async fn get(&self, request: &Request) -> Outcome {
        let input = match validation::validate_get(request) {
            Ok(input) => input,
            Err(error) => return rejected("get", error),
        };

        let call = StoreCall::Select {
            table: input.entity.table(),
            columns: input.projection.select_list(),
            filter: Filter::eq(input.entity.key_column(), input.identifier),
        };
        let outcome = normalize::fetched(input.entity, self.call(call).await);
        record("get", outcome)
    }

    /// Find an account-type record by its email.
    pub async fn lookup_account(&self, request: &Request) -> Outcome {
        let input = match validation::validate_account_lookup(request) {
            Ok(input) => input,
            Err(error) => return rejected("lookup_account", error),
        };

        let call = StoreCall::Select {
            table: input.entity.table(),
            columns: input.entity.all_columns(),
            filter: Filter::eq("email", input.identifier),
        };
        let outcome = normalize::account(self.call(call).await);
        record("lookup_account", outcome)
    }

    /// Run a relational lookup keyed by the request's identifier.
    pub async fn relation(&self, relation: Relation, request: &Request) -> Outcome {
        let key = match validation::identifier_of(request) {
            Ok(key) => key,
            Err(error) => return rejected(relation.name(), error),
        };

        let outcome = normalize::collection(relation.noun(), self.call(relation.call(key)).await);
        record(relation.name(), outcome)
    }

    /// Events hosted by the venue named in `identifier`.
    pub async fn events_for_venue(&self, request: &Request) -> Outcome {
        self.relation(Relation::EventsForVenue, request).await
    }

    /// Events the artist named in `identifier` plays.
    pub async fn events_for_artist(&self, request: &Request) -> Outcome {
        self.relation(Relation::EventsForArtist, request).await
    }

    /// Events the attendee named in `identifier` holds tickets for.
    pub async fn events_for_attendee(&self, request: &Request) -> Outcome {
        self.relation(Relation::EventsForAttendee, request).await
    }

    /// Events in the city named in `identifier`.
    pub async fn events_in_city(&self, request: &Request) -> Outcome {
        self.relation(Relation::EventsInCity, request).await
    }

    /// Cities of the country named in `identifier`.
    pub async fn cities_in_country(&self, request: &Request) -> Outcome {
        self.relation(Relation::CitiesInCountry, request).await
    }

    /// Apply for, accept or reject a gig.
    pub async fn gig(&self, action: GigAction, request: &Request) -> Outcome {
        let input = match validation::validate_gig(request) {
            Ok(input) => input,
            Err(error) => return rejected(action.procedure(), error),
        };

        let mut args = Map::new();
        args.insert("target_event_id".to_string(), Value::String(input.event_id));
        args.insert(
            "applicant_user_id".to_string(),
            Value::String(input.applicant_user_id),
        );

        let call = StoreCall::Rpc {
            procedure: action.procedure(),
            args,
        };
        let outcome = normalize::workflow(action.success_message(), self.call(call).await);
        record(action.procedure(), outcome)
    }

    async fn call(&self, call: StoreCall) -> RawResult {
        let operation = call.operation();
        let target = call.target();
        metrics::counter!("motive_store_calls_total", "operation" => operation).increment(1);
        tracing::debug!(operation, target, "Calling store");

        let result = self.gateway.execute(call).await;
        if let Err(error) = &result {
            tracing::warn!(operation, target, error = %error, "Store call failed");
        }
        result
    }
}

fn rejected(operation: &'static str, error: ValidationError) -> Outcome {
    tracing::debug!(operation, error = %error, "Request rejected");
    record(operation, Outcome::from(error))
}

fn record(operation: &'static str, outcome: Outcome) -> Outcome {
    metrics::counter!(
        "motive_outcomes_total",
        "operation" => operation,
        "outcome" => outcome.label()
    )
    .increment(1);
    outcome
}
