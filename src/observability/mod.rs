//! Observability module
//!
//! Logging and structured event infrastructure for following a phrase as
//! it is refereed.

pub mod events;
pub mod logging;

pub use events::{Event, EventEmitter};
pub use logging::{LogFormat, init_logging};
