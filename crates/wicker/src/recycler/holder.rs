//! Row holders: per-row controllers owning one reusable view handle.
//!
//! A holder owns exactly one externally-inflated [`ViewHandle`] for its
//! entire lifetime and knows how to bind arbitrary items of the declared
//! type to it. Many holders may exist for one shape over time (the view
//! surface recycles them across positions), but each holder is bound to at
//! most one item at a time.
//!
//! The adapter-visible part of a holder lives in [`HolderState`]: the view
//! handle, the externally-maintained current position, the last bound item,
//! and a weak back-reference to the host adapter for self-initiated
//! updates. That back-reference replaces the original platform's trick of
//! stashing the holder as an opaque tag on its view — here the association
//! is explicit and owned by the holder itself.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::Result;
use crate::recycler::shape::ShapeId;

/// A global counter for unique view-handle ids.
static VIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// An opaque, externally-inflated view handle.
///
/// The view surface allocates these (via its [`ViewInflater`]); the engine
/// only routes them into holders and back out through events. A handle
/// remembers the shape it was inflated from so surfaces can pool recycled
/// holders per shape.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ViewHandle {
    id: u64,
    shape: ShapeId,
}

impl ViewHandle {
    /// Creates a fresh handle for a view inflated from `shape`.
    pub fn new(shape: ShapeId) -> Self {
        Self {
            id: VIEW_ID_COUNTER.fetch_add(1, Ordering::Relaxed),
            shape,
        }
    }

    /// The unique id of this handle.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The shape this view was inflated from.
    pub fn shape(&self) -> ShapeId {
        self.shape
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHandle")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Inflates visual templates into view handles.
///
/// Owned by the view surface, not by this engine. The surface calls it
/// when it needs a fresh row view for a shape no recycled holder covers.
pub trait ViewInflater: Send + Sync {
    /// Allocates a view for the template identified by `shape`.
    fn inflate(&self, shape: ShapeId) -> ViewHandle;
}

/// The host side of holder-initiated updates.
///
/// Implemented by the adapter; holders hold it weakly and never control
/// its lifetime.
pub trait HolderHost<T>: Send + Sync {
    /// Replaces the item at `position` with `item` and notifies observers.
    fn update_row(&self, position: usize, item: T) -> Result<()>;
}

/// The adapter-visible core of a holder.
///
/// Tracks what the adapter needs to route binds and events: the owned
/// view, the current position, and the last bound item. The position is
/// externally maintained — it is recorded on bind and may be adjusted by
/// the view surface as rows shift, or cleared when the surface detaches
/// the row.
pub struct HolderState<T> {
    view: ViewHandle,
    position: RwLock<Option<usize>>,
    data: RwLock<Option<T>>,
    host: RwLock<Option<Weak<dyn HolderHost<T>>>>,
}

impl<T> HolderState<T> {
    /// Creates the state for a holder owning `view`.
    pub fn new(view: ViewHandle) -> Self {
        Self {
            view,
            position: RwLock::new(None),
            data: RwLock::new(None),
            host: RwLock::new(None),
        }
    }

    /// The view handle this holder owns.
    pub fn view(&self) -> &ViewHandle {
        &self.view
    }

    /// The holder's current adapter position, if attached.
    pub fn position(&self) -> Option<usize> {
        *self.position.read()
    }

    /// Sets the current adapter position.
    ///
    /// Called by the view surface when rows shift under a live holder.
    pub fn set_position(&self, position: usize) {
        *self.position.write() = Some(position);
    }

    /// Clears the tracked position.
    ///
    /// Called by the view surface when it detaches the row; subsequent
    /// click events on this holder become no-ops.
    pub fn clear_position(&self) {
        *self.position.write() = None;
    }

    /// Records a completed bind: the position and the bound item.
    pub(crate) fn record_bind(&self, position: usize, item: T) {
        *self.position.write() = Some(position);
        *self.data.write() = Some(item);
    }

    /// Attaches the host adapter for self-initiated updates.
    pub(crate) fn attach_host(&self, host: Weak<dyn HolderHost<T>>) {
        *self.host.write() = Some(host);
    }

    fn host(&self) -> Option<Arc<dyn HolderHost<T>>> {
        self.host.read().as_ref().and_then(Weak::upgrade)
    }
}

impl<T: Clone> HolderState<T> {
    /// The last item bound to this holder, if any.
    pub fn bound_item(&self) -> Option<T> {
        self.data.read().clone()
    }
}

impl<T> fmt::Debug for HolderState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HolderState")
            .field("view", &self.view)
            .field("position", &*self.position.read())
            .finish_non_exhaustive()
    }
}

/// A row controller owning one reusable view handle.
///
/// Implement [`on_bind`](RowHolder::on_bind) to push item data into the
/// owned view. Binding is an idempotent overwrite: a holder goes from
/// unbound to bound on its first bind and every later bind simply replaces
/// the position and item. Disposal is the view surface's business; the
/// engine never observes a holder becoming unbound again.
pub trait RowHolder<T>: Send + Sync {
    /// The adapter-visible state of this holder.
    fn state(&self) -> &HolderState<T>;

    /// Pushes `item` into the owned view.
    ///
    /// Invoked by the adapter after the bind is recorded. The mapping
    /// between positions and holders is the adapter's responsibility, so
    /// `item` is always a valid row; a hook that cannot render it has a
    /// programming error and should panic rather than limp on.
    fn on_bind(&self, item: &T);

    /// The view handle this holder owns.
    fn view<'a>(&'a self) -> &'a ViewHandle
    where
        T: 'a,
    {
        self.state().view()
    }

    /// The holder's current adapter position, if attached.
    fn position(&self) -> Option<usize> {
        self.state().position()
    }

    /// The last item bound to this holder.
    fn bound_item(&self) -> Option<T>
    where
        T: Clone,
    {
        self.state().bound_item()
    }

    /// Routes a holder-initiated data change back through the host
    /// adapter, which replaces the row's item and notifies observers.
    ///
    /// A holder that is detached (no tracked position) or was never wired
    /// to an adapter drops the request silently.
    fn request_update(&self, item: T) -> Result<()> {
        let state = self.state();
        let (Some(position), Some(host)) = (state.position(), state.host()) else {
            return Ok(());
        };
        host.update_row(position, item)
    }
}

/// Produces holders for freshly inflated views.
///
/// Invoked by the adapter only when the view surface has no recyclable
/// holder of the requested shape — pooling itself is the surface's
/// responsibility. The returned holder must already be wired to render
/// binds for that shape; the adapter attaches itself as update host
/// afterwards.
pub trait HolderFactory<T>: Send + Sync {
    /// Creates a holder owning `view`, built for the template `shape`.
    fn create(&self, view: ViewHandle, shape: ShapeId) -> Arc<dyn RowHolder<T>>;
}

/// Closures are factories.
impl<T, F> HolderFactory<T> for F
where
    F: Fn(ViewHandle, ShapeId) -> Arc<dyn RowHolder<T>> + Send + Sync,
{
    fn create(&self, view: ViewHandle, shape: ShapeId) -> Arc<dyn RowHolder<T>> {
        self(view, shape)
    }
}

/// A holder whose bind hook is a closure.
///
/// The closure-based companion to implementing [`RowHolder`] directly,
/// for rows that don't warrant a named type.
pub struct ClosureHolder<T> {
    state: HolderState<T>,
    on_bind: Box<dyn Fn(&ViewHandle, &T) + Send + Sync>,
}

impl<T> ClosureHolder<T> {
    /// Creates a holder for `view` whose bind hook is `on_bind`.
    pub fn new<F>(view: ViewHandle, on_bind: F) -> Self
    where
        F: Fn(&ViewHandle, &T) + Send + Sync + 'static,
    {
        Self {
            state: HolderState::new(view),
            on_bind: Box::new(on_bind),
        }
    }
}

impl<T: Send + Sync> RowHolder<T> for ClosureHolder<T> {
    fn state(&self) -> &HolderState<T> {
        &self.state
    }

    fn on_bind(&self, item: &T) {
        (self.on_bind)(self.state.view(), item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn view_handles_are_unique() {
        let a = ViewHandle::new(ShapeId::new(1));
        let b = ViewHandle::new(ShapeId::new(1));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.shape(), b.shape());
    }

    #[test]
    fn holder_starts_unbound() {
        let holder = ClosureHolder::<String>::new(ViewHandle::new(ShapeId::new(1)), |_, _| {});
        assert_eq!(holder.position(), None);
        assert_eq!(holder.bound_item(), None);
    }

    #[test]
    fn record_bind_then_clear_position() {
        let state = HolderState::new(ViewHandle::new(ShapeId::new(1)));
        state.record_bind(3, "row");
        assert_eq!(state.position(), Some(3));
        assert_eq!(state.bound_item(), Some("row"));

        state.clear_position();
        assert_eq!(state.position(), None);
        // The last bound item survives detachment.
        assert_eq!(state.bound_item(), Some("row"));
    }

    #[test]
    fn closure_holder_invokes_hook_with_owned_view() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recv = seen.clone();
        let view = ViewHandle::new(ShapeId::new(9));
        let view_id = view.id();

        let holder = ClosureHolder::new(view, move |view, item: &&str| {
            recv.lock().push((view.id(), *item));
        });

        holder.on_bind(&"hello");
        assert_eq!(*seen.lock(), vec![(view_id, "hello")]);
    }

    #[test]
    fn request_update_without_host_is_a_no_op() {
        let holder = ClosureHolder::<&str>::new(ViewHandle::new(ShapeId::new(1)), |_, _| {});
        holder.state().record_bind(0, "x");
        assert_eq!(holder.request_update("y"), Ok(()));
    }
}
