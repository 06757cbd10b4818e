//! Registry of section trigger handles.
//!
//! The registry maps section indices to the element that receives focus during
//! keyboard navigation. Unregistering empties a slot without shifting later
//! slots, so positions stay aligned with section indices.
//!
//! Every registration carries an identity token. A registration can only clear
//! the slot it created: when a section remounts and registers again before the
//! old registration is released, the stale release is ignored.

use std::fmt;
use std::sync::{Arc, Weak};

use horizon_accordion_core::logging::targets;
use parking_lot::RwLock;

/// An element that can receive keyboard focus.
///
/// The presentation layer implements this for whatever it renders triggers
/// and panels into. Closures implement it directly.
pub trait FocusTarget: Send + Sync {
    /// Move keyboard focus to this element.
    fn focus(&self);
}

impl<F> FocusTarget for F
where
    F: Fn() + Send + Sync,
{
    fn focus(&self) {
        self()
    }
}

/// A shared handle to a focusable element.
pub type TriggerHandle = Arc<dyn FocusTarget>;

struct Slot {
    token: u64,
    handle: TriggerHandle,
}

/// Index-aligned storage of trigger handles.
#[derive(Default)]
pub struct SectionRegistry {
    slots: Vec<Option<Slot>>,
    next_token: u64,
}

impl SectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions, including empty ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the registry has no positions at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The handle registered at `index`, if the slot is occupied.
    pub fn get(&self, index: usize) -> Option<&TriggerHandle> {
        self.slots.get(index)?.as_ref().map(|slot| &slot.handle)
    }

    /// Whether a handle is registered at `index`.
    pub fn is_registered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Snapshot every position in order.
    pub fn handles(&self) -> Vec<Option<TriggerHandle>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|slot| slot.handle.clone()))
            .collect()
    }

    /// Store `handle` at `index`, replacing any previous registration.
    ///
    /// Returns the identity token of the new registration.
    fn insert(&mut self, index: usize, handle: TriggerHandle) -> u64 {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        self.next_token += 1;
        let token = self.next_token;
        self.slots[index] = Some(Slot { token, handle });
        token
    }

    /// Empty the slot at `index` if it still holds registration `token`.
    fn clear_if(&mut self, index: usize, token: u64) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.as_ref().is_some_and(|s| s.token == token) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied: Vec<bool> = self.slots.iter().map(Option::is_some).collect();
        f.debug_struct("SectionRegistry")
            .field("slots", &occupied)
            .finish()
    }
}

/// A shared registry, as owned by the coordinator.
pub(crate) type SharedRegistry = Arc<RwLock<SectionRegistry>>;

/// Register `handle` at `index` in a shared registry.
pub(crate) fn register(
    registry: &SharedRegistry,
    index: usize,
    handle: TriggerHandle,
) -> SectionRegistration {
    let token = registry.write().insert(index, handle);
    tracing::debug!(target: targets::REGISTRY, index, token, "section registered");
    SectionRegistration {
        registry: Arc::downgrade(registry),
        index,
        token,
        released: false,
    }
}

/// The capability to unregister one section registration.
///
/// Calling [`unregister`](Self::unregister), or dropping the registration,
/// empties the slot only if it still holds this registration.
#[must_use = "dropping the registration unregisters the section"]
pub struct SectionRegistration {
    registry: Weak<RwLock<SectionRegistry>>,
    index: usize,
    token: u64,
    released: bool,
}

impl SectionRegistration {
    /// The registered index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Release this registration.
    ///
    /// Returns `true` if the slot was cleared, `false` if a newer registration
    /// had already replaced it (or the accordion is gone).
    pub fn unregister(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let cleared = registry.write().clear_if(self.index, self.token);
        if cleared {
            tracing::debug!(target: targets::REGISTRY, index = self.index, "section unregistered");
        } else {
            tracing::trace!(
                target: targets::REGISTRY,
                index = self.index,
                token = self.token,
                "ignoring stale unregister"
            );
        }
        cleared
    }
}

impl Drop for SectionRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SectionRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionRegistration")
            .field("index", &self.index)
            .field("token", &self.token)
            .field("released", &self.released)
            .finish()
    }
}

static_assertions::assert_impl_all!(SectionRegistration: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn shared() -> SharedRegistry {
        Arc::new(RwLock::new(SectionRegistry::new()))
    }

    fn handle() -> TriggerHandle {
        Arc::new(|| {})
    }

    #[test]
    fn test_register_grows_with_empty_slots() {
        let registry = shared();
        let _reg = register(&registry, 2, handle());

        let registry = registry.read();
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_registered(0));
        assert!(!registry.is_registered(1));
        assert!(registry.is_registered(2));
    }

    #[test]
    fn test_unregister_clears_without_compacting() {
        let registry = shared();
        let first = register(&registry, 0, handle());
        let _second = register(&registry, 1, handle());

        assert!(first.unregister());
        let registry = registry.read();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_registered(0));
        assert!(registry.is_registered(1));
    }

    #[test]
    fn test_stale_unregister_keeps_newer_registration() {
        let registry = shared();
        let focused = Arc::new(AtomicUsize::new(0));

        let stale = register(&registry, 0, handle());
        let focused_clone = focused.clone();
        let _fresh = register(
            &registry,
            0,
            Arc::new(move || {
                focused_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(!stale.unregister());
        let current = registry.read().get(0).cloned();
        current.expect("fresh registration survives").focus();
        assert_eq!(focused.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unregisters() {
        let registry = shared();
        {
            let _reg = register(&registry, 0, handle());
            assert!(registry.read().is_registered(0));
        }
        assert!(!registry.read().is_registered(0));
    }

    #[test]
    fn test_unregister_after_registry_dropped() {
        let registry = shared();
        let reg = register(&registry, 0, handle());
        drop(registry);
        assert!(!reg.unregister());
    }

    #[test]
    fn test_handles_snapshot() {
        let registry = shared();
        let _a = register(&registry, 0, handle());
        let _c = register(&registry, 2, handle());

        let handles = registry.read().handles();
        let occupied: Vec<bool> = handles.iter().map(Option::is_some).collect();
        assert_eq!(occupied, vec![true, false, true]);
    }
}
