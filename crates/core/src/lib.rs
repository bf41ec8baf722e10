//! # evslot core
//!
//! Domain types and rules for booking EV charging connectors: civil dates
//! and clock times, the fixed slot catalog, availability computation and
//! the booking service that ties them to a storage backend.

pub mod availability;
pub mod catalog;
pub mod clock;
pub mod errors;
pub mod models;
pub mod repository;
pub mod service;
pub mod time;
