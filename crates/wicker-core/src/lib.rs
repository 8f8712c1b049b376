//! Core systems for Wicker.
//!
//! This crate provides the foundational components of the Wicker toolkit:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Thread Affinity**: Debug checks that components stay on their UI thread
//! - **Logging**: `tracing` target constants for per-subsystem filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use wicker_core::Signal;
//!
//! // A signal that notifies observers of inserted row ranges.
//! let rows_inserted = Signal::<(usize, usize)>::new();
//!
//! let conn_id = rows_inserted.connect(|(start, count)| {
//!     println!("{count} rows inserted at {start}");
//! });
//!
//! rows_inserted.emit((2, 1));
//! rows_inserted.disconnect(conn_id);
//! ```

pub mod logging;
mod signal;
mod thread_check;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
