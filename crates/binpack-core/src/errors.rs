//! Packing error types.

use thiserror::Error;

/// Errors returned by bin and packer operations.
#[derive(Debug, Error)]
pub enum PackError {
    /// Capacity below 1 at bin or packer construction.
    #[error("capacity must be at least 1, got {capacity}")]
    InvalidCapacity {
        /// Rejected capacity.
        capacity: usize,
    },

    /// `add` was called without an item.
    #[error("item cannot be nil")]
    NilItem,

    /// Item does not fit even an empty bin.
    #[error("item of size {size} exceeds bin capacity {capacity}")]
    ItemTooLarge {
        /// Size of the rejected item.
        size: usize,
        /// Capacity shared by every bin.
        capacity: usize,
    },

    /// A listener failed while an event was being dispatched.
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// Failure raised by a listener's `update` callback.
///
/// Dispatch stops at the first failing listener; listeners registered after
/// it do not see the event.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("listener '{listener}' failed: {message}")]
pub struct ListenerError {
    /// Name of the failing listener.
    pub listener: String,
    /// Human-readable failure description.
    pub message: String,
}

impl ListenerError {
    /// Create a listener error.
    pub fn new(listener: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            listener: listener.into(),
            message: message.into(),
        }
    }
}

/// Result type for packing operations.
pub type Result<T> = std::result::Result<T, PackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_capacity_display() {
        let err = PackError::InvalidCapacity { capacity: 0 };
        assert_eq!(err.to_string(), "capacity must be at least 1, got 0");
    }

    #[test]
    fn nil_item_display() {
        assert_eq!(PackError::NilItem.to_string(), "item cannot be nil");
    }

    #[test]
    fn item_too_large_display() {
        let err = PackError::ItemTooLarge {
            size: 150,
            capacity: 100,
        };
        assert_eq!(err.to_string(), "item of size 150 exceeds bin capacity 100");
    }

    #[test]
    fn listener_error_from_conversion() {
        let err: PackError = ListenerError::new("audit", "disk full").into();
        assert!(matches!(err, PackError::Listener(_)));
        assert_eq!(err.to_string(), "listener 'audit' failed: disk full");
    }
}
