//! Section trigger: the header element that opens and closes a section.

use std::sync::Arc;

use horizon_accordion_core::logging::targets;

use crate::attributes::TriggerAttributes;
use crate::keyboard::{KeyPress, Keymap, TriggerAction};
use crate::navigator::FocusNavigator;
use crate::section::SectionController;

/// The kind of element a trigger renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriggerElement {
    /// A native button. The host synthesizes a click for Enter and Space, so
    /// the key itself never toggles.
    #[default]
    NativeButton,
    /// Any other element. Enter and Space toggle the section.
    Custom,
}

/// Controller for a section trigger.
#[derive(Debug)]
pub struct TriggerController {
    section: Arc<SectionController>,
    element: TriggerElement,
    tab_index: Option<i32>,
    keymap: Keymap<TriggerAction>,
}

impl TriggerController {
    /// Create a trigger for `section` rendered as a native button.
    pub fn new(section: Arc<SectionController>) -> Self {
        Self {
            section,
            element: TriggerElement::default(),
            tab_index: None,
            keymap: Keymap::trigger_default(),
        }
    }

    /// Set the element kind using builder pattern.
    pub fn with_element(mut self, element: TriggerElement) -> Self {
        self.element = element;
        self
    }

    /// Set the tab index used while the section is enabled.
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Replace the key bindings using builder pattern.
    pub fn with_keymap(mut self, keymap: Keymap<TriggerAction>) -> Self {
        self.keymap = keymap;
        self
    }

    /// The section this trigger controls.
    pub fn section(&self) -> &Arc<SectionController> {
        &self.section
    }

    /// The element kind.
    pub fn element(&self) -> TriggerElement {
        self.element
    }

    /// Compute the trigger's ARIA attributes.
    pub fn attributes(&self) -> TriggerAttributes {
        let disabled = self.section.is_disabled();
        TriggerAttributes {
            aria_controls: self.section.id().to_string(),
            aria_expanded: self.section.is_open(),
            aria_disabled: disabled || self.section.is_locked(),
            tab_index: if disabled { -1 } else { self.tab_index.unwrap_or(0) },
        }
    }

    /// Handle a key press on the trigger.
    ///
    /// Returns `true` if the key was consumed; the host should then suppress
    /// its default action.
    pub fn handle_key(&self, press: &KeyPress) -> bool {
        let Some(action) = self.keymap.action_for(press.key) else {
            return false;
        };
        let index = self.section.index();
        tracing::trace!(target: targets::KEYBOARD, index, ?action, is_repeat = press.is_repeat, "trigger key");

        let navigator = || FocusNavigator::new(self.section.coordinator());
        match action {
            TriggerAction::FocusNext => {
                navigator().next(index);
            }
            TriggerAction::FocusPrevious => {
                navigator().prev(index);
            }
            TriggerAction::FocusFirst => {
                navigator().first();
            }
            TriggerAction::FocusLast => {
                navigator().last();
            }
            TriggerAction::Toggle => {
                if self.element == TriggerElement::NativeButton {
                    return false;
                }
                if !press.is_repeat {
                    self.section.toggle();
                }
            }
        }
        true
    }

    /// Handle a click (or a host-synthesized click) on the trigger.
    pub fn handle_click(&self) -> bool {
        self.section.toggle()
    }
}
