//! Clock port for timing generation runs.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Generation metadata records a start time and duration; a recorded clock
/// keeps that metadata reproducible under replay.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
