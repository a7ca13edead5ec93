//! Single-slot session ownership.
//!
//! A [`SessionSlot`] admits one session at a time. Acquiring it yields a
//! [`SessionGuard`]; dropping the guard is the only way the slot is released,
//! so every exit path of a session (including a dropped future) frees it
//! exactly once.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

#[derive(Debug, Default)]
pub struct SessionSlot {
    busy: AtomicBool,
    released: AtomicU64,
    /// Abort channel of the active session, `None` while idle
    abort: Mutex<Option<watch::Sender<bool>>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` if a session already holds it.
    pub fn try_acquire(&self) -> Option<SessionGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        let (tx, rx) = watch::channel(false);
        *self.abort_lock() = Some(tx);
        Some(SessionGuard { slot: self, abort_rx: rx })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Signal the active session to stop. Returns `false` when idle.
    pub fn abort(&self) -> bool {
        match self.abort_lock().as_ref() {
            Some(tx) => tx.send(true).is_ok(),
            None => false,
        }
    }

    /// How many sessions have released the slot so far.
    pub fn released_count(&self) -> u64 {
        self.released.load(Ordering::Acquire)
    }

    fn abort_lock(&self) -> MutexGuard<'_, Option<watch::Sender<bool>>> {
        // The guarded value stays consistent even if a holder panicked
        self.abort.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Proof of holding the slot; releases it on drop.
#[derive(Debug)]
pub struct SessionGuard<'a> {
    slot: &'a SessionSlot,
    abort_rx: watch::Receiver<bool>,
}

impl SessionGuard<'_> {
    /// A handle that resolves once this session is aborted.
    pub fn abort_signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.abort_rx.clone(),
        }
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        *self.slot.abort_lock() = None;
        self.slot.released.fetch_add(1, Ordering::AcqRel);
        self.slot.busy.store(false, Ordering::Release);
    }
}

/// Future-side view of a session's abort channel.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve when the session is aborted; pend forever otherwise.
    pub async fn aborted(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                // Slot released without an abort: nothing will ever fire
                std::future::pending::<()>().await;
            }
        }
    }
}
