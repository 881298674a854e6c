//! Cluster membership: who we know about and whom we gossip with next.
pub mod registry;
pub mod rotation;
pub mod view;

pub use registry::Registry;
pub use rotation::PeerRotation;
pub use view::MembershipView;
