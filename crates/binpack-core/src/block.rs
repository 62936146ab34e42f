//! Sized items.
//!
//! A [`Block`] pairs an opaque payload with a measurement function. The
//! size is evaluated each time it is asked for, never cached, so the
//! measurement must be pure and deterministic.

use std::fmt;
use std::sync::Arc;

/// Anything with a non-negative integer size.
pub trait Sizer {
    /// Current size.
    fn size(&self) -> usize;
}

type Measure<T> = Arc<dyn Fn(&T) -> usize + Send + Sync>;

/// A payload paired with its size measurement.
pub struct Block<T> {
    data: T,
    measure: Measure<T>,
}

impl<T> Block<T> {
    /// Create a block whose size is computed from the payload.
    pub fn new<F>(data: T, measure: F) -> Self
    where
        F: Fn(&T) -> usize + Send + Sync + 'static,
    {
        Self {
            data,
            measure: Arc::new(measure),
        }
    }

    /// Create a block with a constant size.
    pub fn fixed(data: T, size: usize) -> Self {
        Self::new(data, move |_| size)
    }

    /// Borrow the payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the block and return the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> Sizer for Block<T> {
    fn size(&self) -> usize {
        (self.measure)(&self.data)
    }
}

impl<T: Clone> Clone for Block<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            measure: Arc::clone(&self.measure),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("data", &self.data)
            .field("size", &self.size())
            .finish()
    }
}
