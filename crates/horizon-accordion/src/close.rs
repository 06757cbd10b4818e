//! Close control rendered inside a panel.

use std::sync::Arc;

use horizon_accordion_core::logging::targets;

use crate::attributes::CloseAttributes;
use crate::section::SectionController;

/// Default accessible label of a close control.
pub const DEFAULT_CLOSE_LABEL: &str = "Close section";

/// Controller for a button that closes its section.
#[derive(Debug)]
pub struct CloseController {
    section: Arc<SectionController>,
    label: String,
}

impl CloseController {
    /// Create a close control for `section`.
    pub fn new(section: Arc<SectionController>) -> Self {
        Self {
            section,
            label: DEFAULT_CLOSE_LABEL.to_string(),
        }
    }

    /// Set the accessible label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The accessible label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Compute the close control's ARIA attributes.
    pub fn attributes(&self) -> CloseAttributes {
        CloseAttributes {
            aria_controls: self.section.id().to_string(),
            aria_expanded: self.section.is_open(),
            aria_label: self.label.clone(),
            aria_disabled: self.section.is_locked(),
        }
    }

    /// Close the section.
    pub fn handle_click(&self) -> bool {
        tracing::trace!(target: targets::PANEL, index = self.section.index(), "close clicked");
        self.section.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccordionOptions;
    use crate::coordinator::AccordionCoordinator;
    use crate::section::SectionOptions;

    fn section(options: AccordionOptions) -> Arc<SectionController> {
        let coordinator = Arc::new(AccordionCoordinator::new(&options).unwrap());
        Arc::new(SectionController::new(coordinator, 0, &SectionOptions::new().with_id("s")))
    }

    #[test]
    fn test_default_attributes() {
        let close = CloseController::new(section(AccordionOptions::new().with_default_open(0)));
        let attrs = close.attributes().to_attribute_set();
        assert_eq!(attrs.get("aria-controls"), Some("s"));
        assert_eq!(attrs.get("aria-expanded"), Some("true"));
        assert_eq!(attrs.get("aria-label"), Some("Close section"));
        assert_eq!(attrs.get("aria-disabled"), Some("true"));
    }

    #[test]
    fn test_click_closes() {
        let section = section(
            AccordionOptions::new()
                .with_default_open(0)
                .with_allow_all_closed(true),
        );
        let close = CloseController::new(section.clone()).with_label("Hide answer");
        assert_eq!(close.label(), "Hide answer");
        assert!(close.handle_click());
        assert!(!section.is_open());
    }

    #[test]
    fn test_click_on_locked_section_is_refused() {
        let section = section(AccordionOptions::new().with_default_open(0));
        let close = CloseController::new(section.clone());
        assert!(!close.handle_click());
        assert!(section.is_open());
    }
}
