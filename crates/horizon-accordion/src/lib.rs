//! Horizon Accordion - accessible accordion controllers.
//!
//! This crate holds the state logic of a WAI-ARIA accordion: which sections
//! are open, how keyboard focus moves between section triggers, and which
//! attributes each element carries. Rendering is left to the host, which
//! applies the computed attributes and forwards input events.
//!
//! - [`AccordionCoordinator`] owns the open set and enforces the
//!   single/multiple-open and allow-all-closed policies
//! - [`SectionController`] is the per-section facade with the `disabled` gate
//! - [`navigator`] moves focus across triggers with wraparound
//! - [`TriggerController`], [`PanelController`] and [`CloseController`]
//!   translate input into section operations and expose ARIA attributes
//!
//! # Example
//!
//! ```
//! use horizon_accordion::{
//!     Accordion, AccordionOptions, Key, KeyPress, SectionOptions, TriggerController,
//!     TriggerElement,
//! };
//!
//! let accordion = Accordion::builder(
//!     AccordionOptions::new()
//!         .with_default_open(0)
//!         .with_allow_all_closed(true),
//! )
//! .section(SectionOptions::new().with_id("shipping"))
//! .section(SectionOptions::new().with_id("returns"))
//! .on_change(|open| println!("open sections: {open:?}"))
//! .build()?;
//!
//! let trigger = TriggerController::new(accordion.sections()[1].clone())
//!     .with_element(TriggerElement::Custom);
//! trigger.handle_key(&KeyPress::new(Key::Enter));
//!
//! let attrs = trigger.attributes().to_attribute_set();
//! assert_eq!(attrs.get("aria-controls"), Some("returns"));
//! assert_eq!(attrs.get("aria-expanded"), Some("true"));
//! # Ok::<(), horizon_accordion::AccordionError>(())
//! ```

pub mod accordion;
pub mod attributes;
pub mod close;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod keyboard;
pub mod navigator;
pub mod open_set;
pub mod panel;
pub mod registry;
pub mod section;
pub mod trigger;

#[cfg(feature = "accessibility")]
pub mod accessibility;

pub use accordion::{Accordion, AccordionBuilder, AccordionChild};
pub use attributes::{AttributeSet, CloseAttributes, PanelAttributes, TriggerAttributes};
pub use close::{CloseController, DEFAULT_CLOSE_LABEL};
pub use config::AccordionOptions;
pub use coordinator::AccordionCoordinator;
pub use error::{AccordionError, Result};
pub use keyboard::{Key, KeyPress, Keymap, PanelAction, TriggerAction};
pub use navigator::{FocusNavigator, focus_first, focus_last, focus_next, focus_prev};
pub use open_set::{ControlMode, OpenSections, OpenSet, OpenValue};
pub use panel::PanelController;
pub use registry::{FocusTarget, SectionRegistration, SectionRegistry, TriggerHandle};
pub use section::{SectionController, SectionOptions, SectionState, TriggerRef, next_section_id};
pub use trigger::{TriggerController, TriggerElement};

#[cfg(feature = "accessibility")]
pub use accessibility::AccordionRole;

pub use horizon_accordion_core::{ConnectionGuard, ConnectionId, Signal, TreeStyle};
