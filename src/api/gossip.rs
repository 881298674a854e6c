use std::sync::Arc;

use axum::{body::Bytes, extract::State};
use tracing::{debug, event, instrument, Level};

use crate::error::Result;
use crate::membership::{MembershipView, Registry};

/// Handle incoming gossip pushes from peers.
///
/// The body is parsed by hand so that any content type is accepted.
#[instrument(skip(registry, body), level = "debug")]
pub async fn receive_gossip(
    State(registry): State<Arc<Registry>>,
    body: Bytes,
) -> Result<&'static str> {
    let view = MembershipView::from_json(&body).map_err(|err| {
        event!(
            Level::WARN,
            message = "Rejected gossip payload",
            err = format!("{}", err)
        );
        err
    })?;

    let received = view.len();
    let learned = registry.merge(view)?;
    debug!(
        "[{}] Merged gossip with {} members ({} new)",
        registry.local_address(),
        received,
        learned
    );
    Ok("success")
}
