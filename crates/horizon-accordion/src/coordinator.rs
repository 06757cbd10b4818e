//! The accordion coordinator.
//!
//! [`AccordionCoordinator`] owns the open set and the trigger registry of one
//! accordion. Every section controller shares it through an `Arc`.
//!
//! # Controlled and uncontrolled use
//!
//! An uncontrolled coordinator commits transitions itself and emits
//! [`changed`](AccordionCoordinator::changed). A controlled coordinator never
//! commits on its own: [`activate`](AccordionCoordinator::activate) and
//! [`deactivate`](AccordionCoordinator::deactivate) emit
//! [`change_requested`](AccordionCoordinator::change_requested) with the set
//! the owner should supply next, and the owner commits it with
//! [`set_open`](AccordionCoordinator::set_open).
//!
//! ```
//! use horizon_accordion::{AccordionCoordinator, AccordionOptions, OpenSections};
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//!
//! let coordinator = AccordionCoordinator::new(&AccordionOptions::new().with_default_open(0))
//!     .unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let seen_clone = seen.clone();
//! coordinator.changed.connect(move |open| seen_clone.lock().push(open.clone()));
//!
//! coordinator.activate(2);
//! assert!(coordinator.is_open(2));
//! assert!(!coordinator.is_open(0));
//! assert_eq!(*seen.lock(), vec![OpenSections::Single(Some(2))]);
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_accordion_core::logging::{span_names, targets};
use horizon_accordion_core::{Property, Signal};
use parking_lot::RwLock;

use crate::config::{AccordionOptions, validate_open_set};
use crate::error::{AccordionError, Result};
use crate::open_set::{ControlMode, OpenSections, OpenSet, OpenValue};
use crate::registry::{self, SectionRegistration, SectionRegistry, SharedRegistry, TriggerHandle};

/// Shared state of one accordion.
pub struct AccordionCoordinator {
    mode: ControlMode,
    allow_all_closed: bool,
    controlled: bool,
    open: Property<OpenSet>,
    registry: SharedRegistry,

    /// Emitted after the effective open set changed.
    ///
    /// Never emitted during construction.
    pub changed: Signal<OpenSections>,

    /// Emitted by a controlled coordinator when a section asks to open or
    /// close. Carries the open set the owner should pass to
    /// [`set_open`](Self::set_open).
    pub change_requested: Signal<OpenSections>,
}

impl AccordionCoordinator {
    /// Create a coordinator from validated options.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`AccordionOptions::validate`].
    pub fn new(options: &AccordionOptions) -> Result<Self> {
        let initial = options.validate()?;
        let mode = options.control_mode();
        tracing::debug!(
            target: targets::COORDINATOR,
            ?mode,
            allow_all_closed = options.allow_all_closed,
            controlled = options.is_controlled(),
            open = ?initial.as_slice(),
            "coordinator created"
        );

        Ok(Self {
            mode,
            allow_all_closed: options.allow_all_closed,
            controlled: options.is_controlled(),
            open: Property::new(initial),
            registry: Arc::new(RwLock::new(SectionRegistry::new())),
            changed: Signal::new(),
            change_requested: Signal::new(),
        })
    }

    /// The control mode fixed at construction.
    pub fn control_mode(&self) -> ControlMode {
        self.mode
    }

    /// Whether every section may be closed.
    pub fn allow_all_closed(&self) -> bool {
        self.allow_all_closed
    }

    /// Whether the open set is owned by the caller.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Whether section `index` is open.
    pub fn is_open(&self, index: usize) -> bool {
        self.open.with(|open| open.contains(index))
    }

    /// A snapshot of the effective open set.
    pub fn opened(&self) -> OpenSet {
        self.open.get()
    }

    /// Number of open sections.
    pub fn open_count(&self) -> usize {
        self.open.with(OpenSet::len)
    }

    /// The effective open set in notification form.
    pub fn open_sections(&self) -> OpenSections {
        self.open.with(|open| OpenSections::from_set(open, self.mode))
    }

    /// Whether closing section `index` would be refused because it is the
    /// only open section and every section may not be closed.
    pub fn is_locked(&self, index: usize) -> bool {
        !self.allow_all_closed && self.open.with(|open| open.len() == 1 && open.contains(index))
    }

    /// Open section `index`.
    ///
    /// Returns `true` if the open set changed (uncontrolled) or a change was
    /// requested (controlled). Opening an open section does nothing.
    pub fn activate(&self, index: usize) -> bool {
        let _span =
            tracing::trace_span!(target: targets::COORDINATOR, span_names::TRANSITION, index, op = "activate")
                .entered();
        self.transition(|open| open.activated(index, self.mode), "already open")
    }

    /// Close section `index`.
    ///
    /// Closing a section that is not open does nothing, as does closing the
    /// only open section when every section may not be closed.
    pub fn deactivate(&self, index: usize) -> bool {
        let _span =
            tracing::trace_span!(target: targets::COORDINATOR, span_names::TRANSITION, index, op = "deactivate")
                .entered();
        self.transition(
            |open| open.deactivated(index, self.allow_all_closed),
            "not open or last open section",
        )
    }

    fn transition(&self, f: impl FnOnce(&OpenSet) -> OpenSet, refusal: &'static str) -> bool {
        if self.controlled {
            let (current, proposed) = self.open.with(|open| (open.clone(), f(open)));
            if proposed == current {
                tracing::trace!(target: targets::COORDINATOR, reason = refusal, "transition ignored");
                return false;
            }
            tracing::debug!(
                target: targets::COORDINATOR,
                proposed = ?proposed.as_slice(),
                "change requested"
            );
            self.change_requested.emit(OpenSections::from_set(&proposed, self.mode));
            return true;
        }

        match self.open.update(f) {
            Some(next) => {
                tracing::debug!(target: targets::COORDINATOR, open = ?next.as_slice(), "open set changed");
                self.changed.emit(OpenSections::from_set(&next, self.mode));
                true
            }
            None => {
                tracing::trace!(target: targets::COORDINATOR, reason = refusal, "transition ignored");
                false
            }
        }
    }

    /// Commit a new controlled open value.
    ///
    /// Emits [`changed`](Self::changed) once if the effective set differs.
    /// Returns whether it did.
    ///
    /// # Errors
    ///
    /// - [`AccordionError::NotControlled`] on an uncontrolled coordinator
    /// - the validation errors of [`AccordionOptions::validate`]; the open set
    ///   is left untouched
    pub fn set_open(&self, open: impl Into<OpenValue>) -> Result<bool> {
        if !self.controlled {
            return Err(AccordionError::NotControlled);
        }
        let next = open.into().to_open_set();
        validate_open_set(&next, self.mode, self.allow_all_closed)?;

        match self.open.replace(next.clone()) {
            Some(_) => {
                tracing::debug!(target: targets::COORDINATOR, open = ?next.as_slice(), "controlled open set committed");
                self.changed.emit(OpenSections::from_set(&next, self.mode));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Register the trigger handle of section `index`.
    ///
    /// A later registration at the same index replaces this one. The returned
    /// registration unregisters on drop.
    pub fn register_section(&self, index: usize, handle: TriggerHandle) -> SectionRegistration {
        registry::register(&self.registry, index, handle)
    }

    /// The trigger handle registered at `index`.
    pub fn trigger(&self, index: usize) -> Option<TriggerHandle> {
        self.registry.read().get(index).cloned()
    }

    /// Snapshot of every registry position in order.
    pub fn triggers(&self) -> Vec<Option<TriggerHandle>> {
        self.registry.read().handles()
    }

    /// Number of registry positions, including empty ones.
    pub fn section_count(&self) -> usize {
        self.registry.read().len()
    }
}

impl fmt::Debug for AccordionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionCoordinator")
            .field("mode", &self.mode)
            .field("allow_all_closed", &self.allow_all_closed)
            .field("controlled", &self.controlled)
            .field("open", &self.open.get())
            .field("registry", &*self.registry.read())
            .finish()
    }
}

static_assertions::assert_impl_all!(AccordionCoordinator: Send, Sync);
