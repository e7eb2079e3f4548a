//! Single in-flight load flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Prevents overlapping loads from one surface. A second `try_begin` while a
/// load runs returns `None`; it is not queued.
#[derive(Debug, Default)]
pub struct LoadGuard {
    in_flight: AtomicBool,
}

/// Held for the duration of a load; releases the guard on drop.
#[derive(Debug)]
pub struct LoadTicket<'a> {
    guard: &'a LoadGuard,
}

impl LoadGuard {
    pub const fn new() -> Self {
        Self { in_flight: AtomicBool::new(false) }
    }

    pub fn try_begin(&self) -> Option<LoadTicket<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadTicket { guard: self })
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for LoadTicket<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}
