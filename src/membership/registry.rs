use std::collections::HashSet;
use std::sync::RwLock;

use tracing::debug;

use super::rotation::PeerRotation;
use super::view::MembershipView;
use crate::concurrency_error;
use crate::error::Result;
use crate::settings::{RotationOrder, Settings};

/// The local view of cluster membership.
///
/// Membership only ever grows. Every merge rebuilds the peer rotation while
/// the write lock is still held; lock order is always members, then rotation.
#[derive(Debug)]
pub struct Registry {
    local: String,
    members: RwLock<HashSet<String>>,
    rotation: PeerRotation,
}

impl Registry {
    /// Start with ourselves plus the seed peer, if there is one
    pub fn new(local: impl Into<String>, seed: Option<String>, order: RotationOrder) -> Self {
        let local = local.into();
        let mut members = HashSet::new();
        members.insert(local.clone());
        if let Some(seed) = seed
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            members.insert(seed);
        }
        let rotation = PeerRotation::new(local.clone(), order, &members);
        Self {
            local,
            members: RwLock::new(members),
            rotation,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.listen_address.clone(),
            settings.seed_peer(),
            settings.rotation_order,
        )
    }

    pub fn local_address(&self) -> &str {
        &self.local
    }

    /// Union `incoming` into our membership. Returns how many addresses were new.
    pub fn merge<I>(&self, incoming: I) -> Result<usize>
    where
        I: IntoIterator<Item = String>,
    {
        let mut members = self
            .members
            .write()
            .map_err(|e| concurrency_error!("RwLock write fail {}", e))?;
        let before = members.len();
        members.extend(
            incoming
                .into_iter()
                .filter(|address| !address.trim().is_empty()),
        );
        let learned = members.len() - before;
        self.rotation.rebuild(&members)?;
        if learned > 0 {
            debug!(
                "[{}] Learned {} new members, now {}",
                self.local,
                learned,
                members.len()
            );
        }
        Ok(learned)
    }

    pub fn snapshot(&self) -> Result<MembershipView> {
        self.members
            .read()
            .map_err(|e| concurrency_error!("RwLock read fail {}", e))
            .map(|members| members.iter().cloned().collect())
    }

    pub fn refresh(&self) -> Result<()> {
        let members = self
            .members
            .read()
            .map_err(|e| concurrency_error!("RwLock read fail {}", e))?;
        self.rotation.rebuild(&members)
    }

    pub fn next_target(&self) -> Result<String> {
        self.rotation.next_target()
    }

    /// Current rotation queue, next target first
    pub fn rotation(&self) -> Result<Vec<String>> {
        self.rotation.peers()
    }

    pub fn contains(&self, address: &str) -> Result<bool> {
        self.members
            .read()
            .map_err(|e| concurrency_error!("RwLock read fail {}", e))
            .map(|members| members.contains(address))
    }

    pub fn len(&self) -> Result<usize> {
        self.members
            .read()
            .map_err(|e| concurrency_error!("RwLock read fail {}", e))
            .map(|members| members.len())
    }
}
