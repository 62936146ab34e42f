//! Capacity-bounded bins.
//!
//! A [`Bin`] keeps its blocks in insertion order and tracks the occupied
//! size incrementally. `occupied <= capacity` holds at all times and
//! `occupied` always equals the sum of the contained blocks' sizes, since
//! [`Bin::try_add`] is the only mutator and it checks the fit first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::{Block, Sizer};
use crate::errors::{PackError, Result};

/// Identifier of a bin, equal to its creation index within a packer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinId(usize);

impl BinId {
    /// Create from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for BinId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A capacity-bounded, insertion-ordered collection of blocks.
pub struct Bin<T> {
    id: BinId,
    capacity: usize,
    occupied: usize,
    blocks: Vec<Block<T>>,
}

impl<T> Bin<T> {
    /// Create an empty bin.
    ///
    /// Fails with [`PackError::InvalidCapacity`] when `capacity` is 0.
    pub fn new(capacity: usize, id: BinId) -> Result<Self> {
        if capacity < 1 {
            return Err(PackError::InvalidCapacity { capacity });
        }
        Ok(Self {
            id,
            capacity,
            occupied: 0,
            blocks: Vec::new(),
        })
    }

    /// Whether `block` would fit in the remaining room.
    pub fn fits(&self, block: &Block<T>) -> bool {
        self.occupied
            .checked_add(block.size())
            .is_some_and(|total| total <= self.capacity)
    }

    /// Append `block` if it fits. Returns `false` and leaves the bin
    /// untouched otherwise.
    pub fn add(&mut self, block: Block<T>) -> bool {
        self.try_add(block).is_ok()
    }

    /// Append `block` if it fits, handing it back when it does not.
    ///
    /// Fires no events; announcing the change is the caller's job.
    pub fn try_add(&mut self, block: Block<T>) -> std::result::Result<(), Block<T>> {
        let size = block.size();
        match self.occupied.checked_add(size) {
            Some(total) if total <= self.capacity => {
                self.blocks.push(block);
                self.occupied = total;
                Ok(())
            }
            _ => Err(block),
        }
    }

    /// Sum of the contained blocks' sizes.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Fixed capacity limit.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Room left before the bin is full.
    pub fn remaining(&self) -> usize {
        self.capacity - self.occupied
    }

    /// Creation-order identifier.
    pub fn id(&self) -> BinId {
        self.id
    }

    /// Contained blocks in insertion order.
    pub fn blocks(&self) -> &[Block<T>] {
        &self.blocks
    }

    /// Most recently added block.
    pub fn last(&self) -> Option<&Block<T>> {
        self.blocks.last()
    }

    /// Number of contained blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the bin holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<T> Sizer for Bin<T> {
    fn size(&self) -> usize {
        self.occupied
    }
}

impl<T> fmt::Debug for Bin<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bin")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("occupied", &self.occupied)
            .field("blocks", &self.blocks.len())
            .finish()
    }
}
