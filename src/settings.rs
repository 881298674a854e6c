//! murmur application settings
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::config_error;
use crate::error::Result;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_GOSSIP_TIMEOUT_SECONDS: &str = "5";

/// How newly learned peers are placed into the rotation queue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationOrder {
    /// Appended in sorted address order
    #[default]
    Insertion,
    /// Appended in a random order
    Shuffled,
}

impl std::fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationOrder::Insertion => write!(f, "insertion"),
            RotationOrder::Shuffled => write!(f, "shuffled"),
        }
    }
}

impl std::str::FromStr for RotationOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insertion" => Ok(RotationOrder::Insertion),
            "shuffled" => Ok(RotationOrder::Shuffled),
            _ => Err(format!("Invalid rotation order: {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    // Address we listen on; also our identity in the cluster
    pub listen_address: String,

    // Seconds between gossip rounds
    pub gossip_interval_seconds: u64,

    // Seed peer used to join an existing cluster
    pub initial_peer: Option<String>,

    // Upper bound on a single outbound push
    pub gossip_timeout_seconds: u64,

    pub rotation_order: RotationOrder,
}

impl Settings {
    pub fn gossip_interval(&self) -> Duration {
        Duration::from_secs(self.gossip_interval_seconds)
    }

    pub fn gossip_timeout(&self) -> Duration {
        Duration::from_secs(self.gossip_timeout_seconds)
    }

    /// Seed peer, with blank values treated as absent
    pub fn seed_peer(&self) -> Option<String> {
        self.initial_peer
            .as_deref()
            .map(str::trim)
            .filter(|peer| !peer.is_empty())
            .map(str::to_string)
    }

    /// Resolve the listen address into something we can bind a socket to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        self.listen_address
            .to_socket_addrs()
            .map_err(|e| config_error!("Invalid listen address {}: {}", self.listen_address, e))?
            .next()
            .ok_or_else(|| config_error!("Listen address {} did not resolve", self.listen_address))
    }
}
