//! Port implementations.
//!
//! `live` talks to the real world, `recording` wraps another adapter and
//! captures every interaction to a cassette, `replaying` serves those
//! interactions back.

pub mod live;
pub mod recording;
pub mod replaying;
