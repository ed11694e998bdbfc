//! Per-lobby real-time fan-out of server-sent event frames.

pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::{Hub, HubManager, Subscriber};
pub use protocol::ServerEvent;
pub use session::serve;
