//! Round-robin selection of gossip targets.
//!
//! The queue is a ring of peer addresses with a cursor pointing at the head.
//! Taking a target advances the cursor, which is the same as moving the head
//! to the tail. A rebuild produces a fresh ring and swaps it in under the
//! mutex, so a caller of `next_target` sees either the old ring or the new
//! one.
use std::collections::HashSet;
use std::sync::Mutex;

use rand::seq::SliceRandom;

use crate::concurrency_error;
use crate::error::{MurmurError, Result};
use crate::settings::RotationOrder;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Ring {
    peers: Vec<String>,
    cursor: usize,
}

impl Ring {
    fn next(&mut self) -> Option<String> {
        let peer = self.peers.get(self.cursor)?.clone();
        self.cursor = (self.cursor + 1) % self.peers.len();
        Some(peer)
    }

    /// Peers in the order they will be handed out, head first
    fn pending(&self) -> impl Iterator<Item = &String> {
        self.peers[self.cursor..]
            .iter()
            .chain(self.peers[..self.cursor].iter())
    }
}

#[derive(Debug)]
pub struct PeerRotation {
    local: String,
    order: RotationOrder,
    ring: Mutex<Ring>,
}

impl PeerRotation {
    pub fn new(local: impl Into<String>, order: RotationOrder, members: &HashSet<String>) -> Self {
        let local = local.into();
        let ring = build_ring(&local, order, &Ring::default(), members);
        Self {
            local,
            order,
            ring: Mutex::new(ring),
        }
    }

    /// Replace the ring with one derived from `members`.
    ///
    /// Peers still waiting in the current ring keep their relative order;
    /// anything newly learned goes to the tail.
    pub fn rebuild(&self, members: &HashSet<String>) -> Result<()> {
        let mut ring = self
            .ring
            .lock()
            .map_err(|e| concurrency_error!("Mutex lock fail {}", e))?;
        let rebuilt = build_ring(&self.local, self.order, &ring, members);
        *ring = rebuilt;
        Ok(())
    }

    /// Hand out the head of the queue and rotate it to the tail
    pub fn next_target(&self) -> Result<String> {
        self.ring
            .lock()
            .map_err(|e| concurrency_error!("Mutex lock fail {}", e))?
            .next()
            .ok_or(MurmurError::EmptyQueue)
    }

    pub fn peers(&self) -> Result<Vec<String>> {
        self.ring
            .lock()
            .map_err(|e| concurrency_error!("Mutex lock fail {}", e))
            .map(|ring| ring.pending().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        self.ring
            .lock()
            .map_err(|e| concurrency_error!("Mutex lock fail {}", e))
            .map(|ring| ring.peers.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }
}

fn build_ring(
    local: &str,
    order: RotationOrder,
    previous: &Ring,
    members: &HashSet<String>,
) -> Ring {
    // We don't want to gossip with ourselves.
    let mut peers: Vec<String> = previous
        .pending()
        .filter(|peer| peer.as_str() != local && members.contains(*peer))
        .cloned()
        .collect();

    let mut learned: Vec<String> = {
        let known: HashSet<&str> = peers.iter().map(String::as_str).collect();
        members
            .iter()
            .filter(|member| member.as_str() != local && !known.contains(member.as_str()))
            .cloned()
            .collect()
    };
    match order {
        RotationOrder::Insertion => learned.sort(),
        RotationOrder::Shuffled => learned.shuffle(&mut rand::thread_rng()),
    }
    peers.extend(learned);

    Ring { peers, cursor: 0 }
}
