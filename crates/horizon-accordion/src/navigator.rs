//! Roving focus across section triggers.
//!
//! Navigation works on registry positions and wraps at both ends. An empty
//! target slot (a section that unmounted) swallows the move: focus stays
//! where it is and nothing is skipped.

use horizon_accordion_core::logging::targets;

use crate::coordinator::AccordionCoordinator;
use crate::registry::TriggerHandle;

fn focus_at(registry: &[Option<TriggerHandle>], index: usize) -> bool {
    match registry.get(index) {
        Some(Some(handle)) => {
            tracing::trace!(target: targets::NAVIGATOR, index, "focusing trigger");
            handle.focus();
            true
        }
        _ => {
            tracing::trace!(target: targets::NAVIGATOR, index, "no trigger to focus");
            false
        }
    }
}

/// Focus the trigger after `current`, wrapping to the first.
pub fn focus_next(registry: &[Option<TriggerHandle>], current: usize) -> bool {
    if registry.is_empty() {
        return false;
    }
    let next = current.saturating_add(1);
    focus_at(registry, if next >= registry.len() { 0 } else { next })
}

/// Focus the trigger before `current`, wrapping to the last.
pub fn focus_prev(registry: &[Option<TriggerHandle>], current: usize) -> bool {
    match current.checked_sub(1) {
        Some(prev) => focus_at(registry, prev),
        None => focus_last(registry),
    }
}

/// Focus the first trigger.
pub fn focus_first(registry: &[Option<TriggerHandle>]) -> bool {
    focus_at(registry, 0)
}

/// Focus the last trigger.
pub fn focus_last(registry: &[Option<TriggerHandle>]) -> bool {
    match registry.len().checked_sub(1) {
        Some(last) => focus_at(registry, last),
        None => false,
    }
}

/// Focus navigation over a snapshot of one accordion's triggers.
#[derive(Clone, Default)]
pub struct FocusNavigator {
    registry: Vec<Option<TriggerHandle>>,
}

impl FocusNavigator {
    /// Snapshot the triggers registered with `coordinator`.
    pub fn new(coordinator: &AccordionCoordinator) -> Self {
        Self::from_handles(coordinator.triggers())
    }

    /// Navigate over an explicit list of positions.
    pub fn from_handles(registry: Vec<Option<TriggerHandle>>) -> Self {
        Self { registry }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether there are no positions.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// See [`focus_next`].
    pub fn next(&self, current: usize) -> bool {
        focus_next(&self.registry, current)
    }

    /// See [`focus_prev`].
    pub fn prev(&self, current: usize) -> bool {
        focus_prev(&self.registry, current)
    }

    /// See [`focus_first`].
    pub fn first(&self) -> bool {
        focus_first(&self.registry)
    }

    /// See [`focus_last`].
    pub fn last(&self) -> bool {
        focus_last(&self.registry)
    }
}

impl std::fmt::Debug for FocusNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let occupied: Vec<bool> = self.registry.iter().map(Option::is_some).collect();
        f.debug_struct("FocusNavigator")
            .field("registry", &occupied)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording(count: usize) -> (Vec<Option<TriggerHandle>>, Arc<Mutex<Vec<usize>>>) {
        let focused = Arc::new(Mutex::new(Vec::new()));
        let registry = (0..count)
            .map(|i| {
                let focused = focused.clone();
                let handle: TriggerHandle = Arc::new(move || focused.lock().push(i));
                Some(handle)
            })
            .collect();
        (registry, focused)
    }

    #[test]
    fn test_next_wraps_to_first() {
        let (registry, focused) = recording(3);
        assert!(focus_next(&registry, 0));
        assert!(focus_next(&registry, 2));
        assert_eq!(*focused.lock(), vec![1, 0]);
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let (registry, focused) = recording(3);
        assert!(focus_prev(&registry, 0));
        assert!(focus_prev(&registry, 2));
        assert_eq!(*focused.lock(), vec![2, 1]);
    }

    #[test]
    fn test_first_and_last() {
        let (registry, focused) = recording(3);
        assert!(focus_last(&registry));
        assert!(focus_first(&registry));
        assert_eq!(*focused.lock(), vec![2, 0]);
    }

    #[test]
    fn test_empty_slot_is_not_skipped() {
        let (mut registry, focused) = recording(3);
        registry[1] = None;
        assert!(!focus_next(&registry, 0));
        assert!(!focus_prev(&registry, 2));
        assert!(focused.lock().is_empty());
    }

    #[test]
    fn test_empty_registry_does_nothing() {
        let registry: Vec<Option<TriggerHandle>> = Vec::new();
        assert!(!focus_next(&registry, 0));
        assert!(!focus_prev(&registry, 0));
        assert!(!focus_first(&registry));
        assert!(!focus_last(&registry));
    }

    #[test]
    fn test_navigator_snapshot() {
        let (registry, focused) = recording(2);
        let navigator = FocusNavigator::from_handles(registry);
        assert_eq!(navigator.len(), 2);
        assert!(navigator.next(1));
        assert!(navigator.prev(0));
        assert_eq!(*focused.lock(), vec![0, 1]);
    }
}
