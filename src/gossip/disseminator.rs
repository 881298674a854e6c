use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::transport::PeerTransport;
use crate::error::{MurmurError, Result};
use crate::membership::Registry;

/// Counters for gossip rounds, readable while the loop runs
#[derive(Debug, Default)]
pub struct GossipStats {
    rounds: AtomicU64,
    pushes_sent: AtomicU64,
    push_failures: AtomicU64,
    rounds_skipped: AtomicU64,
}

impl GossipStats {
    pub fn rounds(&self) -> u64 {
        self.rounds.load(Ordering::Relaxed)
    }

    pub fn pushes_sent(&self) -> u64 {
        self.pushes_sent.load(Ordering::Relaxed)
    }

    pub fn push_failures(&self) -> u64 {
        self.push_failures.load(Ordering::Relaxed)
    }

    pub fn rounds_skipped(&self) -> u64 {
        self.rounds_skipped.load(Ordering::Relaxed)
    }
}

/// Periodically pushes our membership view to one peer at a time.
#[derive(Clone)]
pub struct Disseminator {
    registry: Arc<Registry>,
    transport: Arc<dyn PeerTransport>,
    interval: Duration,
    stats: Arc<GossipStats>,
}

impl std::fmt::Debug for Disseminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disseminator")
            .field("local", &self.registry.local_address())
            .field("interval", &self.interval)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Disseminator {
    pub fn new(
        registry: Arc<Registry>,
        transport: Arc<dyn PeerTransport>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            transport,
            interval,
            stats: Arc::new(GossipStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<GossipStats> {
        self.stats.clone()
    }

    /// Run gossip rounds forever. The first round fires immediately.
    pub async fn run(self) {
        let local = self.registry.local_address().to_string();
        info!(
            "[{}] Starting dissemination loop with {}s gossip interval",
            local,
            self.interval.as_secs()
        );

        let mut gossip_timer = time::interval(self.interval);
        gossip_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut gossip_round = 0u64;

        loop {
            gossip_timer.tick().await;
            gossip_round += 1;
            match self.run_round(gossip_round).await {
                Ok(peer) => debug!("[{}] Round {} gossiped to {}", local, gossip_round, peer),
                Err(MurmurError::EmptyQueue) => {
                    debug!("[{}] Round {}: no members to gossip with", local, gossip_round)
                }
                Err(e @ MurmurError::Transport(_)) => {
                    warn!("[{}] Round {}: {}", local, gossip_round, e)
                }
                Err(e) if e.is_recoverable() => {
                    warn!("[{}] Round {} skipped: {}", local, gossip_round, e)
                }
                Err(e) => error!("[{}] Round {} failed: {}", local, gossip_round, e),
            }
        }
    }

    /// One gossip round: pick the next peer and push our whole view to it.
    /// Returns the peer that received the push.
    pub async fn run_round(&self, gossip_round: u64) -> Result<String> {
        self.stats.rounds.fetch_add(1, Ordering::Relaxed);

        let (peer, payload) = match self.prepare_round() {
            Ok(prepared) => prepared,
            Err(e) => {
                self.stats.rounds_skipped.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };

        debug!(
            "[{}] Round {}: trying to gossip to peer {}",
            self.registry.local_address(),
            gossip_round,
            peer
        );
        match self.transport.push(&peer, payload).await {
            Ok(()) => {
                self.stats.pushes_sent.fetch_add(1, Ordering::Relaxed);
                Ok(peer)
            }
            Err(e) => {
                self.stats.push_failures.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    // Locks are only held in here, never across the push
    fn prepare_round(&self) -> Result<(String, Vec<u8>)> {
        let peer = self.registry.next_target()?;
        let payload = self.registry.snapshot()?.to_json()?;
        Ok((peer, payload))
    }
}
