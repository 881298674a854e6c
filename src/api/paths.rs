//! All Paths are recorded here for use throughout this codebase
pub const GOSSIP: &str = "/gossip";

/// Where a peer accepts gossip pushes
pub fn gossip_url(peer: &str) -> String {
    format!("http://{}{}", peer, GOSSIP)
}
