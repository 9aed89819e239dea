//! Moderation commands backed by host match modules.

mod freeze;

pub use freeze::{FreezeOutcome, effective_silent, frozen_list, toggle_freeze};
