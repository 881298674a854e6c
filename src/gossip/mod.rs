//! Outbound gossip: the transport seam and the periodic dissemination loop.
pub mod disseminator;
pub mod transport;

pub use disseminator::{Disseminator, GossipStats};
pub use transport::{HttpTransport, PeerTransport};
