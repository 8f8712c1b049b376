//! The recyclable-list binding engine.
//!
//! This module maps an ordered item collection onto recyclable view rows:
//!
//! - [`ItemStore`]: owns the ordered items and all mutations
//! - [`ShapeResolver`] / [`ShapeId`]: maps each row to its visual template
//! - [`RowHolder`] / [`HolderFactory`]: per-row controllers owning one
//!   reusable view handle each
//! - [`RecyclerAdapter`]: orchestrates the above, routes row events, and
//!   emits structural change notifications
//!
//! # Architecture Overview
//!
//! ```text
//! ┌────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ ItemStore  │────>│ RecyclerAdapter  │────>│ View surface │
//! │  (rows)    │     │  AdapterSignals  │     │  (external)  │
//! └────────────┘     └──────────────────┘     └──────────────┘
//!                       │            ▲
//!              bind / shapes      clicks
//!                       ▼            │
//!                    ┌──────────────────┐
//!                    │ RowHolder (many) │
//!                    └──────────────────┘
//! ```
//!
//! The view surface owns template inflation, holder pooling, and holder
//! disposal; the engine owns data, binding, and notification. All calls
//! are synchronous on the single UI-event thread.

mod adapter;
mod holder;
mod shape;
mod store;

pub use adapter::{AdapterListener, AdapterSignals, ClickHandlers, RecyclerAdapter};
pub use holder::{
    ClosureHolder, HolderFactory, HolderHost, HolderState, RowHolder, ViewHandle, ViewInflater,
};
pub use shape::{ShapeId, ShapeResolver, UniformShape};
pub use store::{ChangeRecord, ItemStore};
