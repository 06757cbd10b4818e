//! Section panel: the collapsible content region.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use horizon_accordion_core::logging::targets;
use parking_lot::RwLock;

use crate::attributes::PanelAttributes;
use crate::keyboard::{KeyPress, Keymap, PanelAction};
use crate::registry::{FocusTarget, TriggerHandle};
use crate::section::SectionController;

/// Controller for a section panel.
pub struct PanelController {
    section: Arc<SectionController>,
    close_on_escape: bool,
    keymap: Keymap<PanelAction>,
    content: RwLock<Option<TriggerHandle>>,
    was_open: AtomicBool,
}

impl PanelController {
    /// Create a panel for `section`.
    pub fn new(section: Arc<SectionController>) -> Self {
        let was_open = AtomicBool::new(section.is_open());
        Self {
            section,
            close_on_escape: true,
            keymap: Keymap::panel_default(),
            content: RwLock::new(None),
            was_open,
        }
    }

    /// Set whether Escape closes the section using builder pattern.
    pub fn with_close_on_escape(mut self, close_on_escape: bool) -> Self {
        self.close_on_escape = close_on_escape;
        self
    }

    /// Replace the key bindings using builder pattern.
    pub fn with_keymap(mut self, keymap: Keymap<PanelAction>) -> Self {
        self.keymap = keymap;
        self
    }

    /// The section this panel belongs to.
    pub fn section(&self) -> &Arc<SectionController> {
        &self.section
    }

    /// Whether Escape closes the section.
    pub fn close_on_escape(&self) -> bool {
        self.close_on_escape
    }

    /// Attach the element that receives focus when the panel opens.
    pub fn set_content(&self, handle: Option<TriggerHandle>) {
        *self.content.write() = handle;
    }

    /// Compute the panel's ARIA attributes.
    pub fn attributes(&self) -> PanelAttributes {
        PanelAttributes {
            id: self.section.id().to_string(),
            aria_hidden: !self.section.is_open(),
        }
    }

    /// Handle a key press inside the panel.
    ///
    /// Escape on an open panel closes the section and returns focus to its
    /// trigger. Returns `true` if the key was consumed.
    pub fn handle_key(&self, press: &KeyPress) -> bool {
        match self.keymap.action_for(press.key) {
            Some(PanelAction::Close) if self.close_on_escape && self.section.is_open() => {
                tracing::trace!(target: targets::PANEL, index = self.section.index(), "escape pressed");
                self.section.close();
                self.section.trigger_ref().focus();
                true
            }
            _ => false,
        }
    }

    /// Move focus into the panel content if the section opened since the
    /// last call.
    ///
    /// Call after each render. A panel that was already open when the
    /// controller was created is not focused. Returns whether focus moved.
    pub fn sync_focus(&self) -> bool {
        let is_open = self.section.is_open();
        let was_open = self.was_open.swap(is_open, Ordering::SeqCst);
        if !is_open || was_open {
            return false;
        }
        let content = self.content.read().clone();
        match content {
            Some(content) => {
                tracing::trace!(target: targets::PANEL, index = self.section.index(), "focusing panel content");
                content.focus();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for PanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelController")
            .field("section", &self.section.index())
            .field("close_on_escape", &self.close_on_escape)
            .field("has_content", &self.content.read().is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(PanelController: Send, Sync);
