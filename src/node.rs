use std::net::TcpListener;
use std::sync::Arc;

use axum::Router;
use tokio::task::JoinHandle;
use tracing::{info, info_span};
use tracing_futures::Instrument;

use crate::api;
use crate::error::{MurmurError, Result};
use crate::gossip::{Disseminator, HttpTransport, PeerTransport};
use crate::membership::Registry;
use crate::settings::Settings;

/// A cluster member: owns the membership registry and hands it to both the
/// dissemination loop and the gossip API.
#[derive(Clone, Debug)]
pub struct GossipNode {
    settings: Settings,
    registry: Arc<Registry>,
    disseminator: Disseminator,
}

impl GossipNode {
    pub fn new(settings: Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings.gossip_timeout())?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    pub fn with_transport(settings: Settings, transport: Arc<dyn PeerTransport>) -> Self {
        let registry = Arc::new(Registry::from_settings(&settings));
        match settings.seed_peer() {
            Some(seed) => info!(
                "[Node<{}>] Joining cluster through seed peer {}",
                registry.local_address(),
                seed
            ),
            None => info!(
                "[Node<{}>] Starting a new cluster (no seed peer)",
                registry.local_address()
            ),
        }
        let disseminator =
            Disseminator::new(registry.clone(), transport, settings.gossip_interval());
        Self {
            settings,
            registry,
            disseminator,
        }
    }

    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn disseminator(&self) -> &Disseminator {
        &self.disseminator
    }

    pub fn api(&self) -> Router {
        api::api(self.registry.clone())
    }

    /// Spawn the dissemination loop in the background
    pub fn start(&self) -> JoinHandle<()> {
        let span = info_span!("dissemination", node = %self.registry.local_address());
        tokio::spawn(self.disseminator.clone().run().instrument(span))
    }

    /// Bind the listen address, start gossiping and serve the gossip API forever
    pub async fn serve(self) -> Result<()> {
        let socket_address = self.settings.bind_address()?;
        let listener = TcpListener::bind(socket_address)?;
        let _dissemination = self.start();
        self.serve_listener(listener).await
    }

    /// Serve the gossip API on an already bound listener
    pub async fn serve_listener(self, listener: TcpListener) -> Result<()> {
        info!(
            "[Node<{}>] Serving gossip on {}",
            self.registry.local_address(),
            listener.local_addr()?
        );
        axum::Server::from_tcp(listener)
            .map_err(|e| MurmurError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
            .serve(self.api().into_make_service())
            .await
            .map_err(|e| MurmurError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
    }
}
