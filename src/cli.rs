//! CLI for this application
//!
use crate::settings;

#[derive(Clone, Debug, clap::Parser)]
#[clap(name = settings::APP_NAME, version = settings::APP_VERSION)]
pub struct Cli {
    // Gossip listen address (host:port)
    #[clap(
        short = 'l',
        long,
        env("MURMUR_LISTEN_ADDRESS"),
        help = "Address to listen on for gossip protocol"
    )]
    pub listen_address: String,

    // Seconds between gossip rounds
    #[clap(
        short = 'g',
        long,
        env("MURMUR_GOSSIP_INTERVAL"),
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Interval between gossip heartbeats in seconds"
    )]
    pub gossip_interval: u64,

    // Seed peer to join an existing cluster
    #[clap(
        short = 'i',
        long,
        env("MURMUR_INITIAL_PEER"),
        help = "Address of initial peer to gossip with when joining cluster"
    )]
    pub initial_peer: Option<String>,

    // Outbound push timeout
    #[clap(
        long,
        default_value = settings::DEFAULT_GOSSIP_TIMEOUT_SECONDS,
        env("MURMUR_GOSSIP_TIMEOUT"),
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Timeout in seconds for a single gossip push"
    )]
    pub gossip_timeout: u64,

    // Order newly learned peers enter the rotation
    #[clap(
        long,
        default_value = "insertion",
        env("MURMUR_ROTATION_ORDER"),
        help = "rotation-order: 'insertion' or 'shuffled'"
    )]
    pub rotation_order: settings::RotationOrder,
}

impl Cli {
    pub fn into_settings(self) -> settings::Settings {
        settings::Settings {
            listen_address: self.listen_address,
            gossip_interval_seconds: self.gossip_interval,
            initial_peer: self.initial_peer,
            gossip_timeout_seconds: self.gossip_timeout,
            rotation_order: self.rotation_order,
        }
    }
}
