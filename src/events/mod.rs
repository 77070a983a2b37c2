//! Talent catalog event stream.
//!
//! Registration events fan out from an in-process bus to the dashboard
//! activity feed and the live notification stream.

pub mod bus;
pub mod feed;

pub use bus::{EventBus, TalentEvent};
pub use feed::{ActivityFeed, FeedHandle};
