//! nimbusdb - a declarative query dispatch layer for document databases
//!
//! Translates a query descriptor into exactly one call on a collection
//! collaborator, with correctly shaped positional and option arguments.

pub mod collection;
pub mod observability;
pub mod query;
