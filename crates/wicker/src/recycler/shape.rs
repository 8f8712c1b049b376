//! Row shape resolution.
//!
//! A *shape* identifies which visual template a row uses. The adapter asks
//! a [`ShapeResolver`] for the shape of each `(position, item)` pair; the
//! view surface uses the resulting [`ShapeId`] to inflate the right
//! template and to pool recycled holders per shape.

use std::fmt;

/// Opaque key selecting which visual template a row uses.
///
/// The adapter never interprets the value. Callers must guarantee that two
/// positions resolving to the same `ShapeId` really do use the same row
/// template — the engine does not validate this (see
/// [`ShapeResolver::resolve`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl ShapeId {
    /// Creates a shape id from a raw template key.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw template key.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShapeId({})", self.0)
    }
}

impl From<u64> for ShapeId {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

/// Maps a row position and item to the shape of its visual template.
///
/// Implementations must be pure and deterministic for a given
/// `(position, item)` pair. Position-dependence is permitted (header vs.
/// body rows); side effects are not.
///
/// # Precondition
///
/// Every position a recycled holder of a given shape can later be bound to
/// must resolve to that same shape. Violating this binds holders to
/// templates they were not built for; the engine does not detect it.
pub trait ShapeResolver<T>: Send + Sync {
    /// Returns the shape for the row at `position` holding `item`.
    fn resolve(&self, position: usize, item: &T) -> ShapeId;
}

/// Closures are resolvers.
impl<T, F> ShapeResolver<T> for F
where
    F: Fn(usize, &T) -> ShapeId + Send + Sync,
{
    fn resolve(&self, position: usize, item: &T) -> ShapeId {
        self(position, item)
    }
}

/// A resolver that returns a single shape for every row.
///
/// The common case for single-template lists.
#[derive(Debug, Clone, Copy)]
pub struct UniformShape(pub ShapeId);

impl<T> ShapeResolver<T> for UniformShape {
    fn resolve(&self, _position: usize, _item: &T) -> ShapeId {
        self.0
    }
}
