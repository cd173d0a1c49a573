//! Single background writer with latest-write-wins coalescing.
//!
//! # Responsibility
//! - Take state snapshots off the caller thread and persist them in order.
//! - Drop snapshots that were superseded before they reached the store.
//!
//! # Invariants
//! - At most one write is in flight; completion order equals submit order.
//! - At most one snapshot is pending; a newer submit replaces it.
//! - Write failures are logged and counted, never retried or surfaced.
//! - Dropping the writer drains the pending snapshot before joining.

use crate::model::state::AppState;
use crate::persist::{save_state, PersistError};
use crate::store::KvStore;
use log::{debug, error, info};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Instant;

const WRITER_THREAD_NAME: &str = "campusmate-state-writer";

/// Counters describing writer activity since spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub submitted: u64,
    pub written: u64,
    /// Snapshots replaced by a newer one before being written.
    pub superseded: u64,
    pub failed: u64,
}

#[derive(Default)]
struct WriterSlot {
    pending: Option<AppState>,
    in_flight: bool,
    shutdown: bool,
    stats: WriterStats,
}

#[derive(Default)]
struct WriterShared {
    slot: Mutex<WriterSlot>,
    wake: Condvar,
    idle: Condvar,
}

impl WriterShared {
    fn lock(&self) -> MutexGuard<'_, WriterSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to the writer thread. Owns the store for its whole lifetime.
pub struct StateWriter {
    shared: Arc<WriterShared>,
    worker: Option<JoinHandle<()>>,
}

impl StateWriter {
    /// Moves `store` onto a dedicated writer thread.
    ///
    /// # Errors
    /// - Returns `WriterSpawn` when the OS refuses to start the thread.
    pub fn spawn<S>(store: S) -> Result<Self, PersistError>
    where
        S: KvStore + Send + 'static,
    {
        let shared = Arc::new(WriterShared::default());
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run_writer(store, &worker_shared))
            .map_err(PersistError::WriterSpawn)?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queues `state` for writing without waiting for I/O.
    pub fn submit(&self, state: AppState) {
        let mut slot = self.shared.lock();
        slot.stats.submitted += 1;
        if slot.pending.replace(state).is_some() {
            slot.stats.superseded += 1;
        }
        self.shared.wake.notify_one();
    }

    /// Blocks until no snapshot is pending or in flight.
    pub fn flush(&self) {
        let mut slot = self.shared.lock();
        while slot.pending.is_some() || slot.in_flight {
            slot = self
                .shared
                .idle
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn stats(&self) -> WriterStats {
        self.shared.lock().stats
    }
}

impl Drop for StateWriter {
    fn drop(&mut self) {
        {
            let mut slot = self.shared.lock();
            slot.shutdown = true;
            self.shared.wake.notify_one();
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=state_writer_stop module=persist status=error error_code=writer_panicked");
            }
        }
    }
}

fn run_writer<S: KvStore>(store: S, shared: &WriterShared) {
    debug!("event=state_writer_start module=persist status=ok");
    loop {
        let state = {
            let mut slot = shared.lock();
            while slot.pending.is_none() && !slot.shutdown {
                slot = shared.wake.wait(slot).unwrap_or_else(PoisonError::into_inner);
            }
            match slot.pending.take() {
                Some(state) => {
                    slot.in_flight = true;
                    state
                }
                None => break,
            }
        };

        let started_at = Instant::now();
        let result = save_state(&store, &state);

        let mut slot = shared.lock();
        slot.in_flight = false;
        match result {
            Ok(()) => {
                slot.stats.written += 1;
                debug!(
                    "event=state_save module=persist status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
            }
            Err(err) => {
                slot.stats.failed += 1;
                error!(
                    "event=state_save module=persist status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
            }
        }
        shared.idle.notify_all();
    }

    let stats = shared.lock().stats;
    info!(
        "event=state_writer_stop module=persist status=ok written={} superseded={} failed={}",
        stats.written, stats.superseded, stats.failed
    );
}
