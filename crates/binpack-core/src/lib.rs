//! # binpack-core
//!
//! Greedy first-fit bin packing with synchronous lifecycle notifications.
//!
//! - **Blocks**: [`block::Block`] pairs a payload with a size measurement
//! - **Bins**: [`bin::Bin`] is a capacity-bounded, insertion-ordered container
//! - **Packer**: [`packer::BinPacker`] places blocks into the earliest-created
//!   bin with room, opening new bins on demand
//! - **Events**: [`events::BinEvent`] announces bin creation, placement and
//!   rejection to listeners held by a [`notifier::Notifier`]
//! - **Errors**: [`errors::PackError`] via `thiserror`
//! - **Logging**: [`logging::init_subscriber`] and capture helpers for tests
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use binpack_core::{Block, BinPacker, EventCounter};
//!
//! let mut packer = BinPacker::<&str>::new(100)?;
//! let counter = Arc::new(EventCounter::new());
//! let _ = packer.listeners().register(counter.clone());
//!
//! packer.add(Block::fixed("a", 30))?;
//! packer.add(Block::fixed("b", 50))?;
//! packer.add(Block::fixed("c", 40))?;
//!
//! assert_eq!(packer.bin_count(), 2);
//! assert_eq!(counter.created(), 2);
//! # Ok::<(), binpack_core::PackError>(())
//! ```
//!
//! ## Threading
//!
//! The packer is single-threaded and synchronous. Callers that share one
//! across threads serialize access themselves (e.g. a `Mutex` around each
//! `add`).

#![deny(unsafe_code)]

pub mod bin;
pub mod block;
pub mod errors;
pub mod events;
pub mod listeners;
pub mod logging;
pub mod notifier;
pub mod packer;

pub use bin::{Bin, BinId};
pub use block::{Block, Sizer};
pub use errors::{ListenerError, PackError, Result};
pub use events::{BinEvent, EventKind};
pub use listeners::{EventCounter, LoggingListener};
pub use notifier::{BinListener, ListenerId, Notifier};
pub use packer::BinPacker;
