//! Cooperative cancellation for a running search.
//!
//! The search polls [`SearchClock::expired`] once per move iteration at every
//! depth. Expiry comes either from a deadline or from a [`StopHandle`] held by
//! another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct SearchClock {
    stop: Arc<AtomicBool>,
    started_at: Instant,
    deadline: Option<Instant>,
}

impl SearchClock {
    pub fn unlimited() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            started_at: Instant::now(),
            deadline: None,
        }
    }

    pub fn with_movetime(movetime_ms: Option<u64>) -> Self {
        let started_at = Instant::now();
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            started_at,
            deadline: movetime_ms.map(|ms| started_at + Duration::from_millis(ms.max(1))),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop),
        }
    }

    /// Re-arms the clock for a new search, keeping existing stop handles.
    pub fn restart(&mut self, movetime_ms: Option<u64>) {
        self.stop.store(false, Ordering::Relaxed);
        self.started_at = Instant::now();
        self.deadline = movetime_ms.map(|ms| self.started_at + Duration::from_millis(ms.max(1)));
    }

    #[inline]
    pub fn expired(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(limit) if Instant::now() >= limit => {
                self.stop.store(true, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}

impl Default for SearchClock {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_clock_never_expires_on_its_own() {
        let clock = SearchClock::unlimited();
        assert!(!clock.expired());
    }

    #[test]
    fn stop_handle_expires_clock_from_another_thread() {
        let clock = SearchClock::unlimited();
        let handle = clock.stop_handle();
        std::thread::spawn(move || handle.stop())
            .join()
            .expect("stopper thread should not panic");
        assert!(clock.expired());
    }

    #[test]
    fn deadline_expires_and_restart_rearms() {
        let mut clock = SearchClock::with_movetime(Some(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.expired());
        assert!(clock.stop_handle().is_stopped());

        clock.restart(None);
        assert!(!clock.expired());
    }
}
