pub mod api;
pub mod cli;
pub mod error;
pub mod gossip;
pub mod membership;
pub mod node;
pub mod settings;
