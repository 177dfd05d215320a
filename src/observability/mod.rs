//! Observability subsystem.
//!
//! Structured logging only; the tool is single-shot, so there is no
//! metrics endpoint to scrape.

pub mod logging;
