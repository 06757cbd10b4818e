//! Construction options for an accordion.
//!
//! # Example
//!
//! ```
//! use horizon_accordion::AccordionOptions;
//!
//! let options = AccordionOptions::new()
//!     .with_default_open([0, 2])
//!     .with_allow_multiple_open(true);
//!
//! let initial = options.validate().unwrap();
//! assert_eq!(initial.as_slice(), &[0, 2]);
//! ```
//!
//! Options are plain data and can be loaded from settings files:
//!
//! ```
//! use horizon_accordion::{AccordionOptions, OpenValue};
//!
//! let options: AccordionOptions =
//!     serde_json::from_str(r#"{ "default_open": 1, "allow_all_closed": true }"#).unwrap();
//! assert_eq!(options.default_open, Some(OpenValue::One(1)));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AccordionError, Result};
use crate::open_set::{ControlMode, OpenSet, OpenValue};

/// Options for constructing an accordion.
///
/// Supplying `open` makes the accordion controlled: its open sections are then
/// owned by the caller and re-supplied on every update. Otherwise the
/// accordion is uncontrolled and seeds its own state from `default_open`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionOptions {
    /// Controlled open sections.
    pub open: Option<OpenValue>,
    /// Initially open sections of an uncontrolled accordion.
    pub default_open: Option<OpenValue>,
    /// Allow more than one section to be open at once.
    pub allow_multiple_open: bool,
    /// Allow every section to be closed.
    pub allow_all_closed: bool,
}

impl AccordionOptions {
    /// Create options with every flag off and nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the controlled open value using builder pattern.
    pub fn with_open(mut self, open: impl Into<OpenValue>) -> Self {
        self.open = Some(open.into());
        self
    }

    /// Set the initial open value using builder pattern.
    pub fn with_default_open(mut self, default_open: impl Into<OpenValue>) -> Self {
        self.default_open = Some(default_open.into());
        self
    }

    /// Set whether several sections may be open using builder pattern.
    pub fn with_allow_multiple_open(mut self, allow: bool) -> Self {
        self.allow_multiple_open = allow;
        self
    }

    /// Set whether every section may be closed using builder pattern.
    pub fn with_allow_all_closed(mut self, allow: bool) -> Self {
        self.allow_all_closed = allow;
        self
    }

    /// Whether these options describe a controlled accordion.
    pub fn is_controlled(&self) -> bool {
        self.open.is_some()
    }

    /// The control mode selected by `allow_multiple_open`.
    pub fn control_mode(&self) -> ControlMode {
        ControlMode::from_allow_multiple(self.allow_multiple_open)
    }

    /// The open set these options start from: `open` when controlled,
    /// `default_open` otherwise, empty when neither is given.
    pub fn initial_open(&self) -> OpenSet {
        self.open
            .as_ref()
            .or(self.default_open.as_ref())
            .map(OpenValue::to_open_set)
            .unwrap_or_default()
    }

    /// Validate the options and return the initial open set.
    ///
    /// # Errors
    ///
    /// - [`AccordionError::MultipleOpenNotAllowed`] when several sections are
    ///   open and `allow_multiple_open` is false
    /// - [`AccordionError::NoOpenSections`] when nothing is open and
    ///   `allow_all_closed` is false
    pub fn validate(&self) -> Result<OpenSet> {
        let initial = self.initial_open();
        validate_open_set(&initial, self.control_mode(), self.allow_all_closed)?;
        Ok(initial)
    }
}

/// Check an open set against the accordion's policy.
pub(crate) fn validate_open_set(
    open: &OpenSet,
    mode: ControlMode,
    allow_all_closed: bool,
) -> Result<()> {
    if !mode.allows_multiple() && open.len() > 1 {
        return Err(AccordionError::MultipleOpenNotAllowed { count: open.len() });
    }
    if !allow_all_closed && open.is_empty() {
        return Err(AccordionError::NoOpenSections);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AccordionOptions::new();
        assert!(!options.is_controlled());
        assert_eq!(options.control_mode(), ControlMode::Single);
        assert!(options.initial_open().is_empty());
    }

    #[test]
    fn test_open_takes_precedence_over_default_open() {
        let options = AccordionOptions::new().with_default_open(0).with_open(1);
        assert!(options.is_controlled());
        assert_eq!(options.initial_open().as_slice(), &[1]);
    }

    #[test]
    fn test_validate_rejects_multiple_in_single_mode() {
        let options = AccordionOptions::new().with_default_open([0, 1]);
        assert_eq!(
            options.validate(),
            Err(AccordionError::MultipleOpenNotAllowed { count: 2 })
        );

        let options = AccordionOptions::new().with_open([0, 1]);
        assert_eq!(
            options.validate(),
            Err(AccordionError::MultipleOpenNotAllowed { count: 2 })
        );
    }

    #[test]
    fn test_validate_rejects_empty_without_allow_all_closed() {
        assert_eq!(
            AccordionOptions::new().validate(),
            Err(AccordionError::NoOpenSections)
        );
        assert!(AccordionOptions::new()
            .with_allow_all_closed(true)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_accepts_multiple_when_enabled() {
        let options = AccordionOptions::new()
            .with_default_open([0, 1])
            .with_allow_multiple_open(true);
        assert_eq!(options.validate().unwrap().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_single_element_array_is_single_open() {
        let options = AccordionOptions::new().with_default_open([1]);
        assert_eq!(options.validate().unwrap().as_slice(), &[1]);
    }

    #[test]
    fn test_load_from_json() {
        let options: AccordionOptions = serde_json::from_str(
            r#"{ "default_open": [0, 2], "allow_multiple_open": true }"#,
        )
        .unwrap();
        assert_eq!(options.default_open, Some(OpenValue::Many(vec![0, 2])));
        assert!(options.allow_multiple_open);
        assert!(!options.allow_all_closed);
        assert!(options.open.is_none());
    }

    #[test]
    fn test_load_from_toml() {
        let options: AccordionOptions = toml::from_str(
            r#"
            open = 1
            allow_all_closed = true
            "#,
        )
        .unwrap();
        assert_eq!(options.open, Some(OpenValue::One(1)));
        assert!(options.allow_all_closed);
    }
}
