//! Change-detecting values.
//!
//! A [`Property<T>`] stores a value behind a lock and reports whether a write
//! actually changed it. Owners pair each property with a [`Signal`] and emit
//! only on real changes:
//!
//! ```
//! use horizon_accordion_core::{Property, Signal};
//!
//! struct Disclosure {
//!     open: Property<bool>,
//!     open_changed: Signal<bool>,
//! }
//!
//! impl Disclosure {
//!     fn set_open(&self, open: bool) {
//!         if self.open.set(open) {
//!             self.open_changed.emit(open);
//!         }
//!     }
//! }
//! ```
//!
//! [`Signal`]: crate::Signal

use std::fmt;

use parking_lot::RwLock;

use crate::logging::targets;

/// A value with change detection.
///
/// `Send + Sync` whenever `T` is.
///
/// ```
/// use horizon_accordion_core::Property;
///
/// let open = Property::new(vec![1]);
/// assert!(!open.set(vec![1]));
/// assert_eq!(open.replace(vec![2]), Some(vec![1]));
/// assert!(open.with(|indices| indices.contains(&2)));
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Wrap `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Clone out the current value. Prefer [`with`](Self::with) to inspect it.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`. Returns whether it differed from the old value.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Store `value` and hand back the old one, or `None` if nothing changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current == value {
            return None;
        }
        tracing::trace!(target: targets::PROPERTY, "property changed");
        Some(std::mem::replace(&mut *current, value))
    }

    /// Compute a new value from the current one and store it atomically.
    ///
    /// `f` runs under the write lock, so no other writer can interleave.
    /// Returns the new value if it differs from the old one.
    pub fn update<F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&T) -> T,
    {
        let mut current = self.value.write();
        let next = f(&current);
        if *current == next {
            return None;
        }
        tracing::trace!(target: targets::PROPERTY, "property updated");
        *current = next.clone();
        Some(next)
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

static_assertions::assert_impl_all!(Property<Vec<usize>>: Send, Sync);
