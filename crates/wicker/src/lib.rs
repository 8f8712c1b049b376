//! Wicker: a recyclable row-binding toolkit.
//!
//! Wicker provides the two pieces of scaffolding a list-heavy application
//! keeps rewriting: a generic, recyclable list-to-view binding engine
//! ([`recycler`]) and an explicit screen-lifecycle state machine
//! ([`screen`]).
//!
//! # The recycler engine
//!
//! [`recycler::RecyclerAdapter`] manages an ordered collection of items,
//! maps each item to a view shape, binds items into recycled row holders,
//! and notifies the view surface of every structural change — insert
//! ranges and full resets — synchronously with the mutation that caused
//! it.
//!
//! ```
//! use std::sync::Arc;
//! use wicker::recycler::{
//!     ClosureHolder, RecyclerAdapter, RowHolder, ShapeId, UniformShape, ViewHandle,
//! };
//!
//! const ROW: ShapeId = ShapeId::new(1);
//!
//! let adapter = RecyclerAdapter::new(
//!     UniformShape(ROW),
//!     |view: ViewHandle, _shape| {
//!         Arc::new(ClosureHolder::new(view, |_view, _item: &String| {}))
//!             as Arc<dyn RowHolder<String>>
//!     },
//! );
//!
//! adapter.signals().rows_inserted.connect(|(start, count)| {
//!     println!("{count} rows inserted at {start}");
//! });
//!
//! adapter.add("first".to_string());
//! assert_eq!(adapter.item_count(), 1);
//! ```
//!
//! # Threading
//!
//! All operations are synchronous and expected on the single UI-event
//! thread supplied by the host; debug builds assert this. Types are
//! nevertheless `Send + Sync` so hosts can own them where convenient.

mod error;
pub mod recycler;
pub mod screen;

pub use error::{Error, Result};
