//! Arena Testkit - In-memory host doubles.
//!
//! Everything here records what the chat core asked the host to do, so tests
//! can assert on deliveries, sounds, scheduled work and bus traffic without a
//! game server.

mod executor;
mod freeze;
mod host;

pub use executor::ManualExecutor;
pub use freeze::{FreezeCall, MockFreezeModule};
pub use host::{
    Delivery, MockMatch, MockMatchManager, MockParty, MockPlayer, RecordingAudience,
    StaticTranslator,
};
