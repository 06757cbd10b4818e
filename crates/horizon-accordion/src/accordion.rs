//! Accordion assembly.
//!
//! [`AccordionBuilder`] validates the child list and the options, creates the
//! shared coordinator and hands it to one [`SectionController`] per section.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use horizon_accordion_core::logging::{span_names, targets};
use horizon_accordion_core::{PerfSpan, TreeStyle};

use crate::config::AccordionOptions;
use crate::coordinator::AccordionCoordinator;
use crate::error::{AccordionError, Result};
use crate::navigator::FocusNavigator;
use crate::open_set::{ControlMode, OpenSections};
use crate::section::{SectionController, SectionOptions};

/// A direct child of an accordion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccordionChild {
    /// A section.
    Section(SectionOptions),
    /// Any other element, named for error reporting.
    Element(String),
}

impl AccordionChild {
    /// A section child.
    pub fn section(options: SectionOptions) -> Self {
        Self::Section(options)
    }

    /// A non-section child.
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(name.into())
    }
}

impl From<SectionOptions> for AccordionChild {
    fn from(options: SectionOptions) -> Self {
        Self::Section(options)
    }
}

type ChangeHandler = Box<dyn Fn(&OpenSections) + Send + Sync>;

/// Builder for [`Accordion`].
///
/// # Example
///
/// ```
/// use horizon_accordion::{AccordionBuilder, AccordionOptions, SectionOptions};
///
/// let accordion = AccordionBuilder::new(AccordionOptions::new().with_default_open(1))
///     .section(SectionOptions::new())
///     .section(SectionOptions::new())
///     .section(SectionOptions::new().with_disabled(true))
///     .build()
///     .unwrap();
///
/// assert!(accordion.section(1).unwrap().is_open());
/// accordion.section(0).unwrap().open();
/// assert!(!accordion.section(1).unwrap().is_open());
/// ```
pub struct AccordionBuilder {
    options: AccordionOptions,
    children: Vec<AccordionChild>,
    on_change: Option<ChangeHandler>,
}

impl AccordionBuilder {
    /// Start building an accordion with `options`.
    pub fn new(options: AccordionOptions) -> Self {
        Self {
            options,
            children: Vec::new(),
            on_change: None,
        }
    }

    /// Append a section.
    pub fn section(self, options: SectionOptions) -> Self {
        self.child(AccordionChild::Section(options))
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<AccordionChild>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AccordionChild>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Call `f` whenever the open set changes after construction.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&OpenSections) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Validate and build the accordion.
    ///
    /// # Errors
    ///
    /// Children are checked first, then the options:
    /// - [`AccordionError::InvalidChild`] for a child that is not a section
    /// - [`AccordionError::MultipleOpenNotAllowed`]
    /// - [`AccordionError::NoOpenSections`]
    pub fn build(self) -> Result<Accordion> {
        let _perf = PerfSpan::new("accordion::build");
        let _span = tracing::debug_span!(
            target: targets::COORDINATOR,
            span_names::BUILD,
            children = self.children.len()
        )
        .entered();

        let mut section_options = Vec::with_capacity(self.children.len());
        for (position, child) in self.children.into_iter().enumerate() {
            match child {
                AccordionChild::Section(options) => section_options.push(options),
                AccordionChild::Element(found) => {
                    tracing::debug!(target: targets::COORDINATOR, position, %found, "invalid accordion child");
                    return Err(AccordionError::InvalidChild { position, found });
                }
            }
        }

        let coordinator = Arc::new(AccordionCoordinator::new(&self.options)?);
        if let Some(on_change) = self.on_change {
            coordinator.changed.connect(move |open| on_change(open));
        }

        let sections = section_options
            .iter()
            .enumerate()
            .map(|(position, options)| {
                Arc::new(SectionController::new(coordinator.clone(), position, options))
            })
            .collect();

        Ok(Accordion {
            coordinator,
            sections,
        })
    }
}

impl fmt::Debug for AccordionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionBuilder")
            .field("options", &self.options)
            .field("children", &self.children)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// An assembled accordion: the coordinator and its sections.
#[derive(Debug)]
pub struct Accordion {
    coordinator: Arc<AccordionCoordinator>,
    sections: Vec<Arc<SectionController>>,
}

impl Accordion {
    /// Start building an accordion.
    pub fn builder(options: AccordionOptions) -> AccordionBuilder {
        AccordionBuilder::new(options)
    }

    /// The shared coordinator.
    pub fn coordinator(&self) -> &Arc<AccordionCoordinator> {
        &self.coordinator
    }

    /// All sections in position order.
    pub fn sections(&self) -> &[Arc<SectionController>] {
        &self.sections
    }

    /// The section with index `index`.
    pub fn section(&self, index: usize) -> Option<&Arc<SectionController>> {
        self.sections.iter().find(|section| section.index() == index)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the accordion has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The effective open set in notification form.
    pub fn open_sections(&self) -> OpenSections {
        self.coordinator.open_sections()
    }

    /// Focus navigation over the currently mounted triggers.
    pub fn navigator(&self) -> FocusNavigator {
        FocusNavigator::new(&self.coordinator)
    }

    /// Re-apply options after the owner re-rendered.
    ///
    /// A controlled accordion commits the new `open` value. The control mode
    /// and `allow_all_closed` are fixed at construction; differing values are
    /// ignored with a warning. Returns whether the open set changed.
    ///
    /// # Errors
    ///
    /// - [`AccordionError::ControlSwitched`] when `options` switch between
    ///   controlled and uncontrolled use
    /// - the validation errors of [`AccordionCoordinator::set_open`]
    pub fn update(&self, options: &AccordionOptions) -> Result<bool> {
        let controlled = self.coordinator.is_controlled();
        if options.is_controlled() != controlled {
            return Err(AccordionError::ControlSwitched {
                was_controlled: controlled,
            });
        }
        if options.control_mode() != self.coordinator.control_mode()
            || options.allow_all_closed != self.coordinator.allow_all_closed()
        {
            tracing::warn!(
                target: targets::COORDINATOR,
                "accordion policy is fixed at construction; ignoring changed options"
            );
        }

        match &options.open {
            Some(open) => self.coordinator.set_open(open.clone()),
            None => Ok(false),
        }
    }

    /// Render the accordion state as a tree for debugging.
    pub fn debug_tree(&self, style: TreeStyle) -> String {
        let mode = match self.coordinator.control_mode() {
            ControlMode::Single => "single",
            ControlMode::Multiple => "multiple",
        };
        let mut out = format!(
            "Accordion ({mode}, {}) open={:?}\n",
            if self.coordinator.is_controlled() {
                "controlled"
            } else {
                "uncontrolled"
            },
            self.coordinator.opened().as_slice()
        );

        for (position, section) in self.sections.iter().enumerate() {
            let state = section.state();
            let _ = write!(
                out,
                "{}#{} {} {}",
                style.connector(position + 1 == self.sections.len()),
                state.index,
                state.id,
                if state.is_open { "open" } else { "closed" }
            );
            if state.is_disabled {
                out.push_str(" disabled");
            }
            if state.is_locked {
                out.push_str(" locked");
            }
            if section.is_mounted() {
                out.push_str(" mounted");
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn sections(count: usize) -> Vec<SectionOptions> {
        (0..count)
            .map(|i| SectionOptions::new().with_id(format!("s-{i}")))
            .collect()
    }

    #[test]
    fn test_build_assigns_positional_indices() {
        let accordion = Accordion::builder(AccordionOptions::new().with_default_open(0))
            .children(sections(3))
            .build()
            .unwrap();

        assert_eq!(accordion.len(), 3);
        let indices: Vec<usize> = accordion.sections().iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(accordion.section(0).unwrap().is_open());
    }

    #[test]
    fn test_invalid_child_is_reported_first() {
        let err = Accordion::builder(AccordionOptions::new().with_open([0, 1]))
            .section(SectionOptions::new())
            .child(AccordionChild::element("div"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            AccordionError::InvalidChild {
                position: 1,
                found: "div".to_string()
            }
        );
    }

    #[test]
    fn test_on_change_not_called_during_build() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();
        let accordion = Accordion::builder(AccordionOptions::new().with_default_open(1))
            .children(sections(2))
            .on_change(move |open| calls_clone.lock().push(open.clone()))
            .build()
            .unwrap();
        assert!(calls.lock().is_empty());

        accordion.section(0).unwrap().open();
        assert_eq!(*calls.lock(), vec![OpenSections::Single(Some(0))]);
    }

    #[test]
    fn test_update_controlled() {
        let accordion = Accordion::builder(AccordionOptions::new().with_open(0))
            .children(sections(2))
            .build()
            .unwrap();

        assert_eq!(accordion.update(&AccordionOptions::new().with_open(1)), Ok(true));
        assert!(accordion.section(1).unwrap().is_open());
        assert_eq!(
            accordion.update(&AccordionOptions::new().with_open([0, 1])),
            Err(AccordionError::MultipleOpenNotAllowed { count: 2 })
        );
        assert_eq!(
            accordion.update(&AccordionOptions::new().with_default_open(0)),
            Err(AccordionError::ControlSwitched {
                was_controlled: true
            })
        );
    }

    #[test]
    fn test_update_uncontrolled_keeps_state() {
        let accordion = Accordion::builder(AccordionOptions::new().with_default_open(0))
            .children(sections(2))
            .build()
            .unwrap();
        accordion.section(1).unwrap().open();

        assert_eq!(
            accordion.update(&AccordionOptions::new().with_default_open(0)),
            Ok(false)
        );
        assert!(accordion.section(1).unwrap().is_open());
    }

    #[test]
    fn test_debug_tree() {
        let accordion = Accordion::builder(AccordionOptions::new().with_default_open(0))
            .children(sections(2))
            .build()
            .unwrap();
        accordion.sections()[1].set_disabled(true);

        let tree = accordion.debug_tree(TreeStyle::Ascii);
        assert_eq!(
            tree,
            "Accordion (single, uncontrolled) open=[0]\n\
             +-- #0 s-0 open locked\n\
             `-- #1 s-1 closed disabled\n"
        );
    }
}
