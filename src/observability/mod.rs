//! Observability for the dispatch layer
//!
//! Structured JSON logging only. One line per event, synchronous,
//! deterministic key ordering.

mod logger;

pub use logger::{Logger, Severity};
