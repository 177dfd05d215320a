//! Resilience primitives.
//!
//! # Design Decisions
//! - Retry decisions live with the relay client, which knows which
//!   failures leave the submission state unknown; this module only
//!   supplies the delay curve
//! - Jittered backoff prevents synchronized resubmission bursts

pub mod backoff;
