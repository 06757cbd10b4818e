//! ARIA attribute contracts for accordion elements.
//!
//! The controllers compute these structs; the presentation layer applies the
//! resulting [`AttributeSet`] to whatever element it renders. Values are the
//! exact strings an HTML host would set.

use std::fmt;

use serde::Serialize;

/// An ordered list of attribute name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeSet {
    entries: Vec<(&'static str, String)>,
}

impl AttributeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.push((name, value.into()));
    }

    /// The value of attribute `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}=\"{value}\"")?;
        }
        Ok(())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Attributes of a section trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerAttributes {
    /// Id of the controlled panel.
    pub aria_controls: String,
    /// Whether the section is open.
    pub aria_expanded: bool,
    /// Whether the section is disabled or locked open.
    pub aria_disabled: bool,
    /// Tab order position.
    pub tab_index: i32,
}

impl TriggerAttributes {
    /// Render as attribute strings.
    pub fn to_attribute_set(&self) -> AttributeSet {
        let mut set = AttributeSet::new();
        set.push("aria-controls", self.aria_controls.clone());
        set.push("aria-expanded", bool_str(self.aria_expanded));
        set.push("aria-disabled", bool_str(self.aria_disabled));
        set.push("tabIndex", self.tab_index.to_string());
        set
    }
}

/// Attributes of a section panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelAttributes {
    /// Element id, referenced by the trigger.
    pub id: String,
    /// Whether the panel is hidden from assistive technology.
    pub aria_hidden: bool,
}

impl PanelAttributes {
    /// Render as attribute strings.
    pub fn to_attribute_set(&self) -> AttributeSet {
        let mut set = AttributeSet::new();
        set.push("id", self.id.clone());
        set.push("aria-hidden", bool_str(self.aria_hidden));
        set
    }
}

/// Attributes of a section close control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloseAttributes {
    /// Id of the controlled panel.
    pub aria_controls: String,
    /// Whether the section is open.
    pub aria_expanded: bool,
    /// Accessible label.
    pub aria_label: String,
    /// Whether the section is locked open.
    pub aria_disabled: bool,
}

impl CloseAttributes {
    /// Render as attribute strings.
    pub fn to_attribute_set(&self) -> AttributeSet {
        let mut set = AttributeSet::new();
        set.push("aria-controls", self.aria_controls.clone());
        set.push("aria-expanded", bool_str(self.aria_expanded));
        set.push("aria-label", self.aria_label.clone());
        set.push("aria-disabled", bool_str(self.aria_disabled));
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_strings() {
        let attrs = TriggerAttributes {
            aria_controls: "s-1".to_string(),
            aria_expanded: true,
            aria_disabled: false,
            tab_index: -1,
        }
        .to_attribute_set();

        assert_eq!(attrs.get("aria-controls"), Some("s-1"));
        assert_eq!(attrs.get("aria-expanded"), Some("true"));
        assert_eq!(attrs.get("aria-disabled"), Some("false"));
        assert_eq!(attrs.get("tabIndex"), Some("-1"));
        assert_eq!(attrs.get("role"), None);
    }

    #[test]
    fn test_display() {
        let attrs = PanelAttributes {
            id: "s-2".to_string(),
            aria_hidden: true,
        }
        .to_attribute_set();
        assert_eq!(attrs.to_string(), r#"id="s-2" aria-hidden="true""#);
    }

    #[test]
    fn test_close_order() {
        let attrs = CloseAttributes {
            aria_controls: "s-3".to_string(),
            aria_expanded: false,
            aria_label: "Close section".to_string(),
            aria_disabled: false,
        }
        .to_attribute_set();
        let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["aria-controls", "aria-expanded", "aria-label", "aria-disabled"]);
    }
}
