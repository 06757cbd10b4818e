//! AccessKit nodes for accordion elements.
//!
//! Hosts that publish an AccessKit tree build one node per trigger, panel and
//! close control from the same attribute structs they apply to the rendered
//! elements. Node ids belong to the host, so relationships are passed in.

use accesskit::{Action, Node, NodeId, Role};

use crate::attributes::{CloseAttributes, PanelAttributes, TriggerAttributes};

/// The accessibility role of an accordion element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccordionRole {
    /// The header button that opens and closes a section.
    Trigger,
    /// The content region of a section.
    Panel,
    /// A button that closes its section.
    Close,
}

impl AccordionRole {
    /// Convert to AccessKit's Role type.
    pub fn to_accesskit_role(self) -> Role {
        match self {
            AccordionRole::Trigger | AccordionRole::Close => Role::Button,
            AccordionRole::Panel => Role::Region,
        }
    }
}

impl TriggerAttributes {
    /// Build the trigger's AccessKit node.
    ///
    /// `panel` is the host's node id for the controlled panel, if published.
    pub fn build_accessible_node(&self, label: &str, panel: Option<NodeId>) -> Node {
        let mut node = Node::new(AccordionRole::Trigger.to_accesskit_role());
        node.set_label(label);
        node.set_expanded(self.aria_expanded);
        if let Some(panel) = panel {
            node.set_controls(vec![panel]);
        }
        if self.aria_disabled {
            node.set_disabled();
        } else {
            node.add_action(Action::Click);
            node.add_action(if self.aria_expanded {
                Action::Collapse
            } else {
                Action::Expand
            });
        }
        if self.tab_index >= 0 {
            node.add_action(Action::Focus);
        }
        node
    }
}

impl PanelAttributes {
    /// Build the panel's AccessKit node with its content children.
    pub fn build_accessible_node(&self, label: Option<&str>, children: &[NodeId]) -> Node {
        let mut node = Node::new(AccordionRole::Panel.to_accesskit_role());
        if let Some(label) = label {
            node.set_label(label);
        }
        if self.aria_hidden {
            node.set_hidden();
        }
        if !children.is_empty() {
            node.set_children(children.to_vec());
        }
        node
    }
}

impl CloseAttributes {
    /// Build the close control's AccessKit node.
    pub fn build_accessible_node(&self, panel: Option<NodeId>) -> Node {
        let mut node = Node::new(AccordionRole::Close.to_accesskit_role());
        node.set_label(self.aria_label.as_str());
        if let Some(panel) = panel {
            node.set_controls(vec![panel]);
        }
        if self.aria_disabled {
            node.set_disabled();
        } else {
            node.add_action(Action::Click);
        }
        node
    }
}
