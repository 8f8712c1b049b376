//! The recyclable-list adapter: orchestration of store, shapes, and holders.
//!
//! [`RecyclerAdapter<T>`] ties the engine together. It owns the
//! [`ItemStore`], resolves row shapes through a [`ShapeResolver`], creates
//! holders through a [`HolderFactory`] and wires them for event routing,
//! binds items into holders on behalf of the view surface, and emits a
//! structural change notification for every mutation — synchronously, from
//! inside the mutating call, so an observer's row count never diverges
//! from [`RecyclerAdapter::item_count`].
//!
//! The view surface collaborates through four calls: [`shape_for`] to
//! decide what to render, [`new_holder`] when it needs a fresh row
//! controller, [`bind`] when a holder must display a row, and the signals
//! in [`AdapterSignals`] to keep its layout in step with the data.
//!
//! [`shape_for`]: RecyclerAdapter::shape_for
//! [`new_holder`]: RecyclerAdapter::new_holder
//! [`bind`]: RecyclerAdapter::bind

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use wicker_core::logging::targets;
use wicker_core::{Signal, ThreadAffinity};

use crate::error::Result;
use crate::recycler::holder::{HolderFactory, HolderHost, RowHolder, ViewHandle};
use crate::recycler::shape::{ShapeId, ShapeResolver};
use crate::recycler::store::{ChangeRecord, ItemStore};

/// Structural change notifications emitted by the adapter.
///
/// The view surface connects to these to update incrementally instead of
/// redrawing everything. Each signal is emitted after the mutation is
/// applied and before the mutating call returns.
pub struct AdapterSignals {
    /// Emitted after rows are inserted. Args: (start index, count).
    pub rows_inserted: Signal<(usize, usize)>,
    /// Emitted after a full structural reset; observers must re-query.
    pub reset: Signal<()>,
    /// Emitted after a single row's item is replaced in place.
    pub row_changed: Signal<usize>,
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSignals {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self {
            rows_inserted: Signal::new(),
            reset: Signal::new(),
            row_changed: Signal::new(),
        }
    }
}

/// Receives row-level interaction events from the adapter.
///
/// Registered by the host via [`RecyclerAdapter::set_listener`]; the
/// adapter holds it only to dispatch events and never controls its
/// lifetime.
pub trait AdapterListener<T>: Send + Sync {
    /// A row was clicked. `item` is the row's item at event time.
    fn on_item_click(&self, holder: &dyn RowHolder<T>, item: &T);

    /// A row was long-clicked. `item` is the row's item at event time.
    fn on_item_long_click(&self, _holder: &dyn RowHolder<T>, _item: &T) {}
}

/// A closure-based [`AdapterListener`].
///
/// ```
/// use wicker::recycler::ClickHandlers;
///
/// let listener = ClickHandlers::new()
///     .on_click(|_holder, item: &String| println!("clicked {item}"))
///     .on_long_click(|_holder, item: &String| println!("held {item}"));
/// # let _ = listener;
/// ```
pub struct ClickHandlers<T> {
    click: Option<Box<dyn Fn(&dyn RowHolder<T>, &T) + Send + Sync>>,
    long_click: Option<Box<dyn Fn(&dyn RowHolder<T>, &T) + Send + Sync>>,
}

impl<T> Default for ClickHandlers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ClickHandlers<T> {
    /// Creates a listener with no handlers.
    pub fn new() -> Self {
        Self {
            click: None,
            long_click: None,
        }
    }

    /// Sets the click handler.
    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn RowHolder<T>, &T) + Send + Sync + 'static,
    {
        self.click = Some(Box::new(f));
        self
    }

    /// Sets the long-click handler.
    pub fn on_long_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn RowHolder<T>, &T) + Send + Sync + 'static,
    {
        self.long_click = Some(Box::new(f));
        self
    }
}

impl<T: Send + Sync> AdapterListener<T> for ClickHandlers<T> {
    fn on_item_click(&self, holder: &dyn RowHolder<T>, item: &T) {
        if let Some(f) = &self.click {
            f(holder, item);
        }
    }

    fn on_item_long_click(&self, holder: &dyn RowHolder<T>, item: &T) {
        if let Some(f) = &self.long_click {
            f(holder, item);
        }
    }
}

/// A generic recyclable-list adapter.
///
/// Orchestrates an ordered item collection, per-row shape resolution,
/// holder creation and binding, and change notification. All operations
/// are synchronous and expected on the single UI-event thread; in debug
/// builds this is asserted.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wicker::recycler::{
///     ClosureHolder, RecyclerAdapter, RowHolder, ShapeId, UniformShape, ViewHandle,
/// };
///
/// const ROW: ShapeId = ShapeId::new(1);
///
/// let adapter = RecyclerAdapter::new(
///     UniformShape(ROW),
///     |view: ViewHandle, _shape| {
///         Arc::new(ClosureHolder::new(view, |_view, item: &String| {
///             // push `item` into the row view
///             let _ = item;
///         })) as Arc<dyn RowHolder<String>>
///     },
/// );
///
/// adapter.add("hello".to_string());
/// assert_eq!(adapter.item_count(), 1);
///
/// let shape = adapter.shape_for(0).unwrap();
/// let holder = adapter.new_holder(ViewHandle::new(shape), shape);
/// adapter.bind(holder.as_ref(), 0).unwrap();
/// assert_eq!(holder.bound_item(), Some("hello".to_string()));
/// ```
pub struct RecyclerAdapter<T> {
    store: ItemStore<T>,
    resolver: Arc<dyn ShapeResolver<T>>,
    factory: Arc<dyn HolderFactory<T>>,
    listener: RwLock<Option<Arc<dyn AdapterListener<T>>>>,
    signals: AdapterSignals,
    affinity: ThreadAffinity,
    /// Handed to holders (weakly) so their self-updates route back here.
    weak_self: Weak<RecyclerAdapter<T>>,
}

impl<T: Clone + Send + Sync + 'static> RecyclerAdapter<T> {
    /// Creates an empty adapter from a shape resolver and holder factory.
    pub fn new(
        resolver: impl ShapeResolver<T> + 'static,
        factory: impl HolderFactory<T> + 'static,
    ) -> Arc<Self> {
        Self::with_items(Vec::new(), resolver, factory)
    }

    /// Creates an adapter seeded with `items`.
    pub fn with_items(
        items: Vec<T>,
        resolver: impl ShapeResolver<T> + 'static,
        factory: impl HolderFactory<T> + 'static,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            store: ItemStore::with_items(items),
            resolver: Arc::new(resolver),
            factory: Arc::new(factory),
            listener: RwLock::new(None),
            signals: AdapterSignals::new(),
            affinity: ThreadAffinity::current(),
            weak_self: weak.clone(),
        })
    }

    /// Registers `listener` at construction time.
    pub fn with_listener(self: Arc<Self>, listener: Arc<dyn AdapterListener<T>>) -> Arc<Self> {
        *self.listener.write() = Some(listener);
        self
    }

    /// The adapter's change notification signals.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    /// Returns the current row count.
    pub fn item_count(&self) -> usize {
        self.store.len()
    }

    /// Returns the item at `position`.
    pub fn item(&self, position: usize) -> Result<T> {
        self.store.get(position)
    }

    /// Resolves the shape of the row at `position`.
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// for an invalid position.
    pub fn shape_for(&self, position: usize) -> Result<ShapeId> {
        self.affinity.debug_assert_same_thread();
        self.store
            .with_item(position, |item| self.resolver.resolve(position, item))
    }

    /// Creates and wires a holder for a freshly inflated view.
    ///
    /// Delegates to the factory, then attaches this adapter as the
    /// holder's update host so holder-initiated changes route back to the
    /// right row. The surface calls this only when no recyclable holder of
    /// `shape` exists.
    pub fn new_holder(&self, view: ViewHandle, shape: ShapeId) -> Arc<dyn RowHolder<T>> {
        self.affinity.debug_assert_same_thread();
        tracing::debug!(target: targets::ADAPTER, ?shape, view = view.id(), "creating holder");
        let holder = self.factory.create(view, shape);
        let host: Weak<dyn HolderHost<T>> = self.weak_self.clone();
        holder.state().attach_host(host);
        holder
    }

    /// Binds the row at `position` into `holder`.
    ///
    /// Records the position and item in the holder's state, then invokes
    /// its bind hook. Rebinding a live holder is an idempotent overwrite.
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// for an invalid position; hook failures are not caught.
    pub fn bind(&self, holder: &dyn RowHolder<T>, position: usize) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        let item = self.store.get(position)?;
        holder.state().record_bind(position, item.clone());
        holder.on_bind(&item);
        Ok(())
    }

    /// Appends one item and notifies observers of the inserted row.
    pub fn add(&self, item: T) {
        self.affinity.debug_assert_same_thread();
        let record = self.store.push(item);
        self.emit_record(record);
    }

    /// Appends a contiguous batch and notifies observers of the inserted
    /// range. An empty batch changes nothing and emits nothing.
    pub fn add_all(&self, batch: impl IntoIterator<Item = T>) {
        self.affinity.debug_assert_same_thread();
        if let Some(record) = self.store.extend(batch) {
            self.emit_record(record);
        }
    }

    /// Empties the collection and notifies observers of the reset.
    pub fn clear(&self) {
        self.affinity.debug_assert_same_thread();
        let record = self.store.clear();
        self.emit_record(record);
    }

    /// Replaces the whole collection and notifies observers of the reset.
    ///
    /// Always repopulates with `items`, including when `items` is empty —
    /// the result is then an empty adapter with a reset notification.
    pub fn replace_all(&self, items: Vec<T>) {
        self.affinity.debug_assert_same_thread();
        let record = self.store.replace_all(items);
        self.emit_record(record);
    }

    fn emit_record(&self, record: ChangeRecord) {
        match record {
            ChangeRecord::Inserted { start, count } => {
                tracing::debug!(target: targets::ADAPTER, start, count, "rows inserted");
                self.signals.rows_inserted.emit((start, count));
            }
            ChangeRecord::Reset => {
                tracing::debug!(target: targets::ADAPTER, "reset");
                self.signals.reset.emit(());
            }
        }
    }

    /// Dispatches a row click to the registered listener.
    ///
    /// The holder's position is re-derived at event time — never cached
    /// from bind time — so the listener always sees the item currently at
    /// the holder's row. A missing listener or a detached holder is a
    /// silent no-op; an out-of-range tracked position is a contract
    /// violation and propagates
    /// [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange).
    pub fn on_row_clicked(&self, holder: &dyn RowHolder<T>) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        let Some(listener) = self.listener.read().clone() else {
            return Ok(());
        };
        let Some(position) = holder.position() else {
            return Ok(());
        };
        let item = self.store.get(position)?;
        tracing::trace!(target: targets::ADAPTER, position, "row clicked");
        listener.on_item_click(holder, &item);
        Ok(())
    }

    /// Dispatches a row long-click to the registered listener.
    ///
    /// Returns `Ok(true)` if a listener consumed the event (dispatched
    /// exactly once), `Ok(false)` if no listener is registered or the
    /// holder is detached — the event is then left for lower-priority
    /// handlers.
    pub fn on_row_long_clicked(&self, holder: &dyn RowHolder<T>) -> Result<bool> {
        self.affinity.debug_assert_same_thread();
        let Some(listener) = self.listener.read().clone() else {
            return Ok(false);
        };
        let Some(position) = holder.position() else {
            return Ok(false);
        };
        let item = self.store.get(position)?;
        tracing::trace!(target: targets::ADAPTER, position, "row long-clicked");
        listener.on_item_long_click(holder, &item);
        Ok(true)
    }

    /// Registers `listener`, replacing any previous one.
    ///
    /// Single slot, last write wins — there is no multi-listener fan-out.
    pub fn set_listener(&self, listener: Arc<dyn AdapterListener<T>>) {
        *self.listener.write() = Some(listener);
    }

    /// Removes the registered listener, if any.
    pub fn clear_listener(&self) {
        *self.listener.write() = None;
    }
}

impl<T: Clone + Send + Sync + 'static> HolderHost<T> for RecyclerAdapter<T> {
    fn update_row(&self, position: usize, item: T) -> Result<()> {
        self.affinity.debug_assert_same_thread();
        self.store.set(position, item)?;
        tracing::debug!(target: targets::ADAPTER, position, "row updated by holder");
        self.signals.row_changed.emit(position);
        Ok(())
    }
}
