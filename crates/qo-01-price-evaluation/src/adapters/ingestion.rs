//! Quote ingestion task
//!
//! Venue clients push quotes into an mpsc channel; this task drains it into
//! the [`QuoteStore`] until the channel closes or shutdown is signalled.

use super::quote_store::QuoteStore;
use shared_types::RawQuote;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Spawn the ingestion loop. Returns the number of accepted quotes on exit.
pub fn spawn_quote_ingestion(
    store: QuoteStore,
    mut quotes: mpsc::Receiver<RawQuote>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut accepted: u64 = 0;
        loop {
            tokio::select! {
                maybe_quote = quotes.recv() => {
                    let Some(quote) = maybe_quote else {
                        debug!("Quote channel closed");
                        break;
                    };
                    if store.record(quote) {
                        accepted += 1;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[qo-01] Shutdown signal received");
                        break;
                    }
                }
            }
        }
        accepted
    })
}
