//! First-fit bin packer.
//!
//! [`BinPacker::add`] scans bins in creation order and places the block in
//! the first one with enough room. When none qualifies it opens a new bin
//! and tries there. The earliest bin always wins, even if a later one would
//! leave less space unused, so the same input sequence always produces the
//! same assignment.
//!
//! ## Event ordering
//!
//! Every event fires after the state change it describes is applied:
//!
//! | Situation | Events |
//! |-----------|--------|
//! | fits an existing bin | `BlockAdded` |
//! | fits a new bin | `BinCreated`, `BlockAdded` |
//! | larger than capacity | `BinCreated`, `BlockIgnored` (+ `ItemTooLarge`) |
//!
//! A rejected block leaves its freshly opened bin empty; later blocks fill
//! it like any other bin. Bins are never removed, merged or rebalanced.

use std::fmt;

use tracing::{debug, warn};

use crate::bin::{Bin, BinId};
use crate::block::{Block, Sizer};
use crate::errors::{PackError, Result};
use crate::events::BinEvent;
use crate::notifier::Notifier;

/// Greedy first-fit packer over bins of one shared capacity.
pub struct BinPacker<T> {
    max: usize,
    bins: Vec<Bin<T>>,
    next_id: usize,
    notifier: Notifier<T>,
}

impl<T> BinPacker<T> {
    /// Create a packer whose bins hold at most `max`.
    ///
    /// Fails with [`PackError::InvalidCapacity`] when `max` is 0.
    pub fn new(max: usize) -> Result<Self> {
        if max < 1 {
            return Err(PackError::InvalidCapacity { capacity: max });
        }
        Ok(Self {
            max,
            bins: Vec::new(),
            next_id: 0,
            notifier: Notifier::new(),
        })
    }

    /// Place a block, returning the id of the bin that received it.
    ///
    /// Accepts a [`Block`] or an `Option<Block>`; `None` fails with
    /// [`PackError::NilItem`]. A block larger than the capacity fails with
    /// [`PackError::ItemTooLarge`] after the `BlockIgnored` event.
    pub fn add(&mut self, block: impl Into<Option<Block<T>>>) -> Result<BinId> {
        let Some(mut block) = block.into() else {
            return Err(PackError::NilItem);
        };

        for index in 0..self.bins.len() {
            match self.bins[index].try_add(block) {
                Ok(()) => return self.announce_added(index),
                Err(rejected) => block = rejected,
            }
        }

        let index = self.open_bin()?;
        match self.bins[index].try_add(block) {
            Ok(()) => self.announce_added(index),
            Err(rejected) => {
                let bin = &self.bins[index];
                let size = rejected.size();
                warn!(bin_id = %bin.id(), size, capacity = self.max, "block exceeds bin capacity");
                self.notifier.notify(&BinEvent::BlockIgnored {
                    bin,
                    block: &rejected,
                })?;
                Err(PackError::ItemTooLarge {
                    size,
                    capacity: self.max,
                })
            }
        }
    }

    /// Open an empty bin ahead of demand.
    pub fn create_bin(&mut self) -> Result<&Bin<T>> {
        let index = self.open_bin()?;
        Ok(&self.bins[index])
    }

    fn open_bin(&mut self) -> Result<usize> {
        let bin = Bin::new(self.max, BinId::new(self.next_id))?;
        self.next_id += 1;
        self.bins.push(bin);

        let index = self.bins.len() - 1;
        let bin = &self.bins[index];
        debug!(bin_id = %bin.id(), capacity = self.max, "opened bin");
        self.notifier.notify(&BinEvent::BinCreated { bin })?;
        Ok(index)
    }

    /// Fire `BlockAdded` for the block `try_add` just appended to bin `index`.
    fn announce_added(&self, index: usize) -> Result<BinId> {
        let bin = &self.bins[index];
        let block = &bin.blocks()[bin.len() - 1];
        debug!(
            bin_id = %bin.id(),
            size = block.size(),
            occupied = bin.occupied(),
            "block added"
        );
        self.notifier.notify(&BinEvent::BlockAdded { bin, block })?;
        Ok(bin.id())
    }

    /// Sum of occupied sizes over all bins.
    pub fn total_size(&self) -> usize {
        self.bins.iter().map(Bin::occupied).sum()
    }

    /// Bins in creation order.
    pub fn bins(&self) -> &[Bin<T>] {
        &self.bins
    }

    /// Look up a bin by id.
    pub fn bin(&self, id: BinId) -> Option<&Bin<T>> {
        self.bins.get(id.index())
    }

    /// Number of bins opened so far.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Capacity shared by every bin.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Listener registry, for `register` and `deregister`.
    pub fn listeners(&mut self) -> &mut Notifier<T> {
        &mut self.notifier
    }
}

impl<T> Sizer for BinPacker<T> {
    fn size(&self) -> usize {
        self.total_size()
    }
}

impl<T> fmt::Debug for BinPacker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinPacker")
            .field("max", &self.max)
            .field("bins", &self.bins.len())
            .field("total_size", &self.total_size())
            .field("notifier", &self.notifier)
            .finish()
    }
}
