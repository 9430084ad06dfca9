//! # Background Persistence Writer
//!
//! The hand-off between the synchronous mutation path and durable storage.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fire-and-Forget Durability                           │
//! │                                                                         │
//! │  dispatch (sync) ──► enqueue(slice, json) ──► unbounded channel        │
//! │                            │                        │                   │
//! │               returns immediately                   ▼                   │
//! │                                              writer task               │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                        slice_store.save(...)           │
//! │                                          │            │                 │
//! │                                         Ok           Err                │
//! │                                          │            │                 │
//! │                                       (silent)   warn! + drop          │
//! │                                                                         │
//! │  Until the write lands there is a window where in-memory state can     │
//! │  diverge from the durable copy on abrupt termination. Accepted: the    │
//! │  in-memory mutation is authoritative for the running session.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `flush` is the one escape hatch: an explicit barrier that resolves once
//! every previously enqueued write has been attempted. Shutdown paths and
//! tests use it; the dispatch path never does.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use salon_db::SliceStoreRepository;

/// Messages accepted by the writer task.
enum PersistMsg {
    /// Write a slice's full serialized state.
    Write {
        slice: &'static str,
        state: String,
    },

    /// Barrier: acknowledged once every earlier Write has been attempted.
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer task.
///
/// Cloneable; dropping every handle closes the channel and lets the task
/// drain its queue and exit.
#[derive(Clone)]
pub struct PersistHandle {
    tx: mpsc::UnboundedSender<PersistMsg>,
}

impl PersistHandle {
    /// Spawns the writer task over the given repository.
    pub fn spawn(repo: SliceStoreRepository) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(repo, rx));
        PersistHandle { tx }
    }

    /// Enqueues a full-slice write. Never blocks, never reports back.
    ///
    /// A closed channel (writer task gone) is itself a persistence failure,
    /// so it gets the same treatment: logged and dropped.
    pub fn enqueue(&self, slice: &'static str, state: String) {
        if self
            .tx
            .send(PersistMsg::Write { slice, state })
            .is_err()
        {
            warn!(slice, "persistence writer is gone; snapshot dropped");
        }
    }

    /// Waits until every previously enqueued write has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(PersistMsg::Flush(ack_tx)).is_ok() {
            // Writer dropping the ack also means the queue is drained.
            let _ = ack_rx.await;
        }
    }
}

/// The writer loop: drains the channel in order, one write at a time.
///
/// Ordering matters: a Flush message is acknowledged only after every Write
/// queued before it has been attempted, and later snapshots of a slice
/// always overwrite earlier ones.
async fn run_writer(repo: SliceStoreRepository, mut rx: mpsc::UnboundedReceiver<PersistMsg>) {
    info!("Persistence writer started");

    while let Some(msg) = rx.recv().await {
        match msg {
            PersistMsg::Write { slice, state } => {
                match repo.save(slice, &state).await {
                    Ok(()) => debug!(slice, "slice snapshot persisted"),
                    // Swallowed by design: in-memory state stays
                    // authoritative, worst case is a stale snapshot on
                    // next load.
                    Err(err) => warn!(slice, error = %err, "slice snapshot write failed"),
                }
            }
            PersistMsg::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    info!("Persistence writer stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================
