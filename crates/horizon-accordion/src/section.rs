//! Per-section controller.
//!
//! A [`SectionController`] binds one section index to the shared coordinator
//! and adds the `disabled` gate: while disabled, `open`, `close` and `toggle`
//! never reach the coordinator.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use horizon_accordion_core::ConnectionId;
use horizon_accordion_core::logging::targets;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::coordinator::AccordionCoordinator;
use crate::registry::{FocusTarget, SectionRegistration, TriggerHandle};

static NEXT_SECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique section id.
pub fn next_section_id() -> String {
    let n = NEXT_SECTION_ID.fetch_add(1, Ordering::Relaxed);
    format!("horizon-accordion-section-{n}")
}

/// Options for a single section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionOptions {
    /// Element id shared by the trigger's `aria-controls` and the panel.
    /// Generated when absent.
    pub id: Option<String>,
    /// Explicit index; defaults to the section's position.
    pub index: Option<usize>,
    /// Whether the section refuses to open or close.
    pub disabled: bool,
}

impl SectionOptions {
    /// Create default section options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element id using builder pattern.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an explicit index using builder pattern.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A shared slot holding the element a section's trigger renders into.
///
/// Clones share the slot. Focusing an empty slot does nothing.
#[derive(Clone, Default)]
pub struct TriggerRef {
    slot: Arc<RwLock<Option<TriggerHandle>>>,
}

impl TriggerRef {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current handle.
    pub fn get(&self) -> Option<TriggerHandle> {
        self.slot.read().clone()
    }

    /// Whether a handle is attached.
    pub fn is_attached(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Store a handle, returning the previous one.
    pub fn set(&self, handle: TriggerHandle) -> Option<TriggerHandle> {
        self.slot.write().replace(handle)
    }

    /// Empty the slot, returning the previous handle.
    pub fn clear(&self) -> Option<TriggerHandle> {
        self.slot.write().take()
    }
}

impl FocusTarget for TriggerRef {
    fn focus(&self) {
        if let Some(handle) = self.get() {
            handle.focus();
        }
    }
}

impl fmt::Debug for TriggerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Snapshot of a section for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionState {
    /// Section index.
    pub index: usize,
    /// Element id.
    pub id: String,
    /// Whether the section is open.
    pub is_open: bool,
    /// Whether the section is disabled.
    pub is_disabled: bool,
    /// Whether the section is the locked sole open section.
    pub is_locked: bool,
}

/// Controller for one accordion section.
pub struct SectionController {
    coordinator: Arc<AccordionCoordinator>,
    index: usize,
    id: String,
    disabled: AtomicBool,
    trigger: TriggerRef,
    registration: Mutex<Option<SectionRegistration>>,
}

impl SectionController {
    /// Create a controller for the section at `position`.
    ///
    /// `options.index` overrides the position.
    pub fn new(
        coordinator: Arc<AccordionCoordinator>,
        position: usize,
        options: &SectionOptions,
    ) -> Self {
        let index = options.index.unwrap_or(position);
        let id = options.id.clone().unwrap_or_else(next_section_id);
        tracing::trace!(target: targets::SECTION, index, %id, "section created");
        Self {
            coordinator,
            index,
            id,
            disabled: AtomicBool::new(options.disabled),
            trigger: TriggerRef::new(),
            registration: Mutex::new(None),
        }
    }

    /// The section index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The section element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The shared coordinator.
    pub fn coordinator(&self) -> &Arc<AccordionCoordinator> {
        &self.coordinator
    }

    /// Whether the section is open.
    pub fn is_open(&self) -> bool {
        self.coordinator.is_open(self.index)
    }

    /// Whether the section is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Update the disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Whether this is the sole open section and may not be closed.
    pub fn is_locked(&self) -> bool {
        self.coordinator.is_locked(self.index)
    }

    /// Open the section.
    pub fn open(&self) -> bool {
        if self.refuse("open") {
            return false;
        }
        self.coordinator.activate(self.index)
    }

    /// Close the section.
    pub fn close(&self) -> bool {
        if self.refuse("close") {
            return false;
        }
        self.coordinator.deactivate(self.index)
    }

    /// Open the section if closed, close it if open.
    pub fn toggle(&self) -> bool {
        if self.refuse("toggle") {
            return false;
        }
        if self.is_open() {
            self.coordinator.deactivate(self.index)
        } else {
            self.coordinator.activate(self.index)
        }
    }

    fn refuse(&self, op: &'static str) -> bool {
        let disabled = self.is_disabled();
        if disabled {
            tracing::trace!(target: targets::SECTION, index = self.index, op, "section disabled");
        }
        disabled
    }

    /// The trigger slot of this section.
    pub fn trigger_ref(&self) -> &TriggerRef {
        &self.trigger
    }

    /// Attach the rendered trigger and register it for keyboard navigation.
    ///
    /// Mounting again replaces the previous handle.
    pub fn mount(&self, handle: TriggerHandle) {
        self.trigger.set(handle.clone());
        let registration = self.coordinator.register_section(self.index, handle);
        // The old registration is stale now, so dropping it leaves the new one.
        let previous = self.registration.lock().replace(registration);
        drop(previous);
    }

    /// Detach the trigger and unregister it.
    ///
    /// Returns whether the registry slot was cleared.
    pub fn unmount(&self) -> bool {
        self.trigger.clear();
        let registration = self.registration.lock().take();
        registration.is_some_and(SectionRegistration::unregister)
    }

    /// Whether a trigger is mounted.
    pub fn is_mounted(&self) -> bool {
        self.registration.lock().is_some()
    }

    /// Snapshot the section for rendering.
    pub fn state(&self) -> SectionState {
        SectionState {
            index: self.index,
            id: self.id.clone(),
            is_open: self.is_open(),
            is_disabled: self.is_disabled(),
            is_locked: self.is_locked(),
        }
    }

    /// Call `f` with the new open state whenever this section opens or closes.
    ///
    /// Disconnect with `coordinator().changed.disconnect(id)`.
    pub fn connect_open_changed<F>(&self, f: F) -> ConnectionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let index = self.index;
        let last = AtomicBool::new(self.is_open());
        self.coordinator.changed.connect(move |open| {
            let is_open = open.contains(index);
            if last.swap(is_open, Ordering::SeqCst) != is_open {
                f(is_open);
            }
        })
    }
}

impl fmt::Debug for SectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionController")
            .field("index", &self.index)
            .field("id", &self.id)
            .field("disabled", &self.is_disabled())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

static_assertions::assert_impl_all!(SectionController: Send, Sync);
static_assertions::assert_impl_all!(TriggerRef: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccordionOptions;
    use std::sync::atomic::AtomicUsize;

    fn coordinator(options: AccordionOptions) -> Arc<AccordionCoordinator> {
        Arc::new(AccordionCoordinator::new(&options).unwrap())
    }

    fn relaxed() -> Arc<AccordionCoordinator> {
        coordinator(
            AccordionOptions::new()
                .with_allow_multiple_open(true)
                .with_allow_all_closed(true),
        )
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = next_section_id();
        let b = next_section_id();
        assert_ne!(a, b);
        assert!(a.starts_with("horizon-accordion-section-"));
    }

    #[test]
    fn test_explicit_id_and_index() {
        let section = SectionController::new(
            relaxed(),
            0,
            &SectionOptions::new().with_id("faq-1").with_index(4),
        );
        assert_eq!(section.id(), "faq-1");
        assert_eq!(section.index(), 4);
    }

    #[test]
    fn test_toggle_round_trip() {
        let section = SectionController::new(relaxed(), 1, &SectionOptions::new());
        assert!(!section.is_open());
        assert!(section.toggle());
        assert!(section.is_open());
        assert!(section.toggle());
        assert!(!section.is_open());
    }

    #[test]
    fn test_disabled_section_never_changes() {
        let coordinator = relaxed();
        let section =
            SectionController::new(coordinator.clone(), 0, &SectionOptions::new().with_disabled(true));
        let emitted = Arc::new(AtomicUsize::new(0));
        let emitted_clone = emitted.clone();
        coordinator.changed.connect(move |_| {
            emitted_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!section.open());
        assert!(!section.toggle());
        assert!(!section.is_open());

        section.set_disabled(false);
        assert!(section.open());
        section.set_disabled(true);
        assert!(!section.close());
        assert!(!section.toggle());
        assert!(section.is_open());
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mount_registers_and_unmount_clears() {
        let coordinator = relaxed();
        let section = SectionController::new(coordinator.clone(), 2, &SectionOptions::new());
        let focused = Arc::new(AtomicUsize::new(0));
        let focused_clone = focused.clone();

        section.mount(Arc::new(move || {
            focused_clone.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(section.is_mounted());
        assert!(section.trigger_ref().is_attached());

        coordinator.trigger(2).unwrap().focus();
        section.trigger_ref().focus();
        assert_eq!(focused.load(Ordering::SeqCst), 2);

        assert!(section.unmount());
        assert!(coordinator.trigger(2).is_none());
        assert!(!section.trigger_ref().is_attached());
        assert!(!section.unmount());
    }

    #[test]
    fn test_remount_keeps_new_handle() {
        let coordinator = relaxed();
        let section = SectionController::new(coordinator.clone(), 0, &SectionOptions::new());
        section.mount(Arc::new(|| {}));
        section.mount(Arc::new(|| {}));
        assert!(coordinator.trigger(0).is_some());
    }

    #[test]
    fn test_state_snapshot() {
        let coordinator = coordinator(AccordionOptions::new().with_default_open(0));
        let section = SectionController::new(coordinator, 0, &SectionOptions::new().with_id("s"));
        assert_eq!(
            section.state(),
            SectionState {
                index: 0,
                id: "s".to_string(),
                is_open: true,
                is_disabled: false,
                is_locked: true,
            }
        );
    }

    #[test]
    fn test_open_changed_reports_own_transitions_only() {
        let coordinator = coordinator(AccordionOptions::new().with_default_open(0));
        let first = SectionController::new(coordinator.clone(), 0, &SectionOptions::new());
        let second = SectionController::new(coordinator.clone(), 1, &SectionOptions::new());
        let third = SectionController::new(coordinator, 2, &SectionOptions::new());

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        first.connect_open_changed(move |open| events_clone.lock().push(open));

        second.open();
        third.open();
        first.open();
        assert_eq!(*events.lock(), vec![false, true]);
    }
}
