//! Population tracking for graceful shutdown (§4.5, mirroring the Go
//! standard library's `sync.WaitGroup` the original group used directly).
//! The guardian itself is exempt: its slot is released at group creation
//! so it never blocks the population count from reaching zero.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};

// Layer 2: Third-party crate imports
use tokio::sync::Notify;

pub(crate) struct WaitGroup {
    count: AtomicUsize,
    notify: Notify,
}

impl WaitGroup {
    pub fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn dec(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub async fn wait_zero(&self) {
        loop {
            if self.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            self.notify.notified().await;
        }
    }
}
