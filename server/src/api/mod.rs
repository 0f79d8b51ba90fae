//! HTTP API handlers.
//!
//! Every handler takes the same JSON body, an operation [`Request`], and
//! returns an [`OutcomeResponse`]. Handlers are thin adapters over the
//! dispatcher.
//!
//! [`Request`]: motive_core::Request
//! [`OutcomeResponse`]: motive_web::OutcomeResponse

pub mod accounts;
pub mod events;
pub mod gigs;
pub mod records;
