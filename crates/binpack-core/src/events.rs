//! Packing lifecycle events.
//!
//! Events borrow the bin (and block) they describe and live only for the
//! duration of a dispatch. Listeners that need to keep information copy it
//! out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bin::Bin;
use crate::block::Block;

/// Discriminant of a [`BinEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A bin was opened.
    BinCreated,
    /// A block was placed in a bin.
    BlockAdded,
    /// A block could not be placed, even in a fresh bin.
    BlockIgnored,
}

impl EventKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BinCreated => "bin_created",
            Self::BlockAdded => "block_added",
            Self::BlockIgnored => "block_ignored",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single packing state transition.
pub enum BinEvent<'a, T> {
    /// A bin was appended to the packer's bin list.
    BinCreated {
        /// The new, empty bin.
        bin: &'a Bin<T>,
    },
    /// A block was placed. The bin already contains the block.
    BlockAdded {
        /// Receiving bin.
        bin: &'a Bin<T>,
        /// The placed block.
        block: &'a Block<T>,
    },
    /// A block was rejected by the freshly opened bin.
    BlockIgnored {
        /// The bin that could not hold the block.
        bin: &'a Bin<T>,
        /// The rejected block.
        block: &'a Block<T>,
    },
}

impl<'a, T> BinEvent<'a, T> {
    /// Event discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BinCreated { .. } => EventKind::BinCreated,
            Self::BlockAdded { .. } => EventKind::BlockAdded,
            Self::BlockIgnored { .. } => EventKind::BlockIgnored,
        }
    }

    /// The bin the event is about.
    pub fn bin(&self) -> &'a Bin<T> {
        match *self {
            Self::BinCreated { bin }
            | Self::BlockAdded { bin, .. }
            | Self::BlockIgnored { bin, .. } => bin,
        }
    }

    /// The block involved, if any.
    pub fn block(&self) -> Option<&'a Block<T>> {
        match *self {
            Self::BinCreated { .. } => None,
            Self::BlockAdded { block, .. } | Self::BlockIgnored { block, .. } => Some(block),
        }
    }
}

impl<T> Clone for BinEvent<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BinEvent<'_, T> {}

impl<T> fmt::Debug for BinEvent<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("BinEvent");
        let _ = s.field("kind", &self.kind()).field("bin", &self.bin().id());
        if let Some(block) = self.block() {
            let _ = s.field("size", &crate::block::Sizer::size(block));
        }
        s.finish()
    }
}
