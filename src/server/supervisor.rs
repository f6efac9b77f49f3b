//! Worker-per-connection bookkeeping
//!
//! Every accepted connection runs in its own tokio task. The supervisor
//! records each worker when it is spawned and a separate reaper task removes
//! the record once the worker signals completion, so the accept loop never
//! waits on a worker.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::debug;

pub type WorkerId = u64;

type Registry = Arc<Mutex<HashMap<WorkerId, SocketAddr>>>;

/// Handle to the worker registry. Cheap to clone.
#[derive(Clone)]
pub struct Supervisor {
    workers: Registry,
    next_id: Arc<AtomicU64>,
    done_tx: mpsc::UnboundedSender<WorkerId>,
}

/// Held by a running worker; reports completion when dropped, including
/// when the worker panics or is cancelled.
struct CompletionGuard {
    id: WorkerId,
    done_tx: mpsc::UnboundedSender<WorkerId>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        // The reaper only goes away with the last supervisor handle.
        let _ = self.done_tx.send(self.id);
    }
}

impl Supervisor {
    /// Creates the registry and spawns its reaper. Must be called from
    /// within a tokio runtime.
    pub fn start() -> Self {
        let workers: Registry = Arc::new(Mutex::new(HashMap::new()));
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        tokio::spawn(reap(workers.clone(), done_rx));

        Self {
            workers,
            next_id: Arc::new(AtomicU64::new(1)),
            done_tx,
        }
    }

    /// Runs `work` as an independent worker for the connection from `peer`.
    pub fn spawn<F>(&self, peer: SocketAddr, work: F) -> WorkerId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.workers).insert(id, peer);

        let guard = CompletionGuard {
            id,
            done_tx: self.done_tx.clone(),
        };

        tokio::spawn(async move {
            let _guard = guard;
            work.await;
        });

        id
    }

    /// Workers spawned but not yet reaped.
    pub fn active(&self) -> usize {
        lock(&self.workers).len()
    }

    pub fn peer_of(&self, id: WorkerId) -> Option<SocketAddr> {
        lock(&self.workers).get(&id).copied()
    }
}

/// Waits for one completion, then drains whatever else has finished.
async fn reap(workers: Registry, mut done_rx: mpsc::UnboundedReceiver<WorkerId>) {
    let mut finished = Vec::new();

    while let Some(id) = done_rx.recv().await {
        finished.push(id);
        while let Ok(id) = done_rx.try_recv() {
            finished.push(id);
        }

        let mut registry = lock(&workers);
        for id in finished.drain(..) {
            if let Some(peer) = registry.remove(&id) {
                debug!(worker = id, %peer, "worker reaped");
            }
        }
    }
}

fn lock(workers: &Registry) -> MutexGuard<'_, HashMap<WorkerId, SocketAddr>> {
    workers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
