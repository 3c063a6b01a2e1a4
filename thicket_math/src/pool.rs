// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recycling pools for scratch geometry.
//!
//! Pools are plain values. Whoever needs scratch storage owns a pool (or a
//! [`Scratch`] bundle) and threads it through by reference, so there is no hidden
//! global state and tests can swap in a fresh pool at will.

use crate::matrix::Matrix;
use crate::vector::Vector;

/// Values that can be handed out by a [`Pool`].
pub trait Recycle {
    /// A fresh value in its canonical state.
    fn create() -> Self;
    /// Restore the canonical state before the value is handed out again.
    fn reset(&mut self);
}

impl Recycle for Vector {
    fn create() -> Self {
        Self::ZERO
    }

    fn reset(&mut self) {
        self.set(0.0, 0.0, 0.0);
    }
}

impl Recycle for Matrix {
    fn create() -> Self {
        Self::IDENTITY
    }

    fn reset(&mut self) {
        self.set_identity();
    }
}

impl<T> Recycle for Vec<T> {
    fn create() -> Self {
        Self::new()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// A free list of reusable values.
///
/// [`get`](Self::get) pops a recycled value or creates a new one;
/// [`recycle`](Self::recycle) resets a value and returns it to the free list.
#[derive(Clone, Debug, Default)]
pub struct Pool<T> {
    free: Vec<T>,
    created: usize,
}

/// Pool of [`Vector`]s.
pub type VectorPool = Pool<Vector>;
/// Pool of [`Matrix`] values.
pub type MatrixPool = Pool<Matrix>;
/// Pool of vertex lists; recycled lists keep their capacity.
pub type VertexPool = Pool<Vec<Vector>>;

impl<T: Recycle> Pool<T> {
    /// Create an empty pool.
    pub const fn new() -> Self {
        Self {
            free: Vec::new(),
            created: 0,
        }
    }

    /// Take a value in its canonical state.
    pub fn get(&mut self) -> T {
        match self.free.pop() {
            Some(v) => v,
            None => {
                self.created += 1;
                T::create()
            }
        }
    }

    /// Return a value to the pool. It is reset immediately.
    pub fn recycle(&mut self, mut value: T) {
        value.reset();
        self.free.push(value);
    }

    /// Return several values at once.
    pub fn recycle_all(&mut self, values: impl IntoIterator<Item = T>) {
        for v in values {
            self.recycle(v);
        }
    }

    /// Drop every pooled value.
    pub fn clear(&mut self) {
        self.free.clear();
    }

    /// Number of values waiting to be reused.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// True if nothing is waiting to be reused.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Total number of values this pool has ever had to allocate.
    pub fn created(&self) -> usize {
        self.created
    }
}

/// The scratch pools used by geometric hot paths.
///
/// The collision engine and hit testing only draw on
/// [`vertices`](Self::vertices). The vector and matrix pools are there for
/// callers that want to recycle values in their own per-frame loops.
#[derive(Clone, Debug, Default)]
pub struct Scratch {
    /// Vectors.
    pub vectors: VectorPool,
    /// Matrices.
    pub matrices: MatrixPool,
    /// Vertex lists.
    pub vertices: VertexPool,
}

impl Scratch {
    /// Create empty pools.
    pub const fn new() -> Self {
        Self {
            vectors: Pool::new(),
            matrices: Pool::new(),
            vertices: Pool::new(),
        }
    }

    /// Empty every pool.
    pub fn clear(&mut self) {
        self.vectors.clear();
        self.matrices.clear();
        self.vertices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recycled_values_are_reset() {
        let mut pool = VectorPool::new();
        let mut v = pool.get();
        v.set(1.0, 2.0, 3.0);
        pool.recycle(v);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(), Vector::ZERO);
        assert_eq!(pool.created(), 1, "second get must reuse the first value");
    }

    #[test]
    fn matrices_come_back_as_identity() {
        let mut pool = MatrixPool::new();
        let mut m = pool.get();
        m.set(0, 2, 42.0);
        pool.recycle(m);
        assert!(pool.get().is_identity());
    }

    #[test]
    fn vertex_lists_keep_capacity() {
        let mut pool = VertexPool::new();
        let mut list = pool.get();
        list.extend([Vector::ZERO; 8]);
        pool.recycle(list);
        let reused = pool.get();
        assert!(reused.is_empty());
        assert!(reused.capacity() >= 8);
    }

    #[test]
    fn clear_empties_every_pool() {
        let mut scratch = Scratch::new();
        scratch.vectors.recycle(Vector::ZERO);
        scratch.matrices.recycle(Matrix::IDENTITY);
        scratch.vertices.recycle(Vec::new());
        scratch.clear();
        assert!(scratch.vectors.is_empty());
        assert!(scratch.matrices.is_empty());
        assert!(scratch.vertices.is_empty());
    }
}
