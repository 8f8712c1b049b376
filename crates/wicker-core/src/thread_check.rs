//! Thread affinity checks.
//!
//! Wicker's adapter and screen types operate on the single UI-event thread
//! supplied by the host. The types themselves are `Send + Sync` so hosts
//! can own them wherever is convenient, but calling their operations from
//! another thread is a contract violation. [`ThreadAffinity`] records the
//! thread a component was created on and provides debug assertions that
//! later calls stay on it.
//!
//! # Usage
//!
//! ```
//! use wicker_core::ThreadAffinity;
//!
//! struct Adapter {
//!     affinity: ThreadAffinity,
//! }
//!
//! impl Adapter {
//!     fn new() -> Self {
//!         Self { affinity: ThreadAffinity::current() }
//!     }
//!
//!     fn mutate(&self) {
//!         self.affinity.debug_assert_same_thread();
//!         // ...
//!     }
//! }
//! ```

use std::thread::ThreadId;

/// The thread a component is bound to.
///
/// Captured at construction via [`ThreadAffinity::current`]. The checks are
/// debug-only, so release builds pay nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl ThreadAffinity {
    /// Capture the current thread as the component's home thread.
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Returns `true` if the calling thread is the captured thread.
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panics in debug builds if called from a different thread.
    #[track_caller]
    pub fn debug_assert_same_thread(&self) {
        debug_assert!(
            self.is_same_thread(),
            "operation called from {:?}, but this component is bound to {:?}",
            std::thread::current().id(),
            self.thread_id,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_thread_passes() {
        let affinity = ThreadAffinity::current();
        assert!(affinity.is_same_thread());
        affinity.debug_assert_same_thread();
    }

    #[test]
    fn other_thread_detected() {
        let affinity = ThreadAffinity::current();
        let observed = std::thread::spawn(move || affinity.is_same_thread())
            .join()
            .unwrap();
        assert!(!observed);
    }
}
