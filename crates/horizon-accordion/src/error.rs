//! Error types for accordion configuration.
//!
//! Only misconfiguration is an error. Refused transitions (a disabled section,
//! closing the last open section) are silent no-ops and never surface here.

use thiserror::Error;

/// Errors raised while building or updating an accordion.
///
/// These are programmer errors: they are returned from construction and
/// update calls and are never coerced into a valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccordionError {
    /// A direct child of the accordion is not a section.
    #[error(
        "Accordion requires that all of its direct children be Section components, \
         found `{found}` at position {position}"
    )]
    InvalidChild {
        /// Position of the offending child.
        position: usize,
        /// Name of the element that was found instead.
        found: String,
    },

    /// More than one section is open while multiple-open mode is disabled.
    #[error(
        "You must enable 'allow_multiple_open' in order to open multiple sections at once \
         ({count} sections were open)"
    )]
    MultipleOpenNotAllowed {
        /// Number of sections that were requested open.
        count: usize,
    },

    /// No section is open while all-closed is disallowed.
    #[error(
        "Accordion requires at least one section to be open, but there were no opened sections \
         (enable 'allow_all_closed' to permit this)"
    )]
    NoOpenSections,

    /// An open value was supplied to an accordion that owns its own state.
    #[error("accordion is uncontrolled; construct it with `open` to set open sections externally")]
    NotControlled,

    /// An update tried to switch between controlled and uncontrolled use.
    #[error("accordion cannot switch between controlled and uncontrolled after construction")]
    ControlSwitched {
        /// Whether the accordion was constructed controlled.
        was_controlled: bool,
    },
}

/// A specialized Result type for accordion operations.
pub type Result<T> = std::result::Result<T, AccordionError>;
