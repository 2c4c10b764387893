//! Structured logging for linedrop.
//!
//! Console output for operators plus a daily-rolling NDJSON file.

pub mod logger;

pub use logger::init_logger;
