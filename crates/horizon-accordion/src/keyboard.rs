//! Keyboard input for accordion triggers and panels.
//!
//! Hosts translate their native key events into [`KeyPress`] values, using
//! [`Key::from_key_name`] or [`Key::from_key_code`] for DOM-style input, and
//! the controllers resolve them through a [`Keymap`].

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Keys the accordion reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
    /// Any other key.
    Other,
}

impl Key {
    /// Translate a DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            13 => Key::Enter,
            32 => Key::Space,
            27 => Key::Escape,
            35 => Key::End,
            36 => Key::Home,
            38 => Key::ArrowUp,
            40 => Key::ArrowDown,
            9 => Key::Tab,
            _ => Key::Other,
        }
    }

    /// Translate a DOM `KeyboardEvent.key` value, including the legacy names
    /// older browsers report.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            _ => Key::Other,
        }
    }
}

/// A key press delivered to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub key: Key,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPress {
    /// A first press of `key`.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            is_repeat: false,
        }
    }

    /// An auto-repeat press of `key`.
    pub fn repeat(key: Key) -> Self {
        Self {
            key,
            is_repeat: true,
        }
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// A mapping from keys to controller actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap<A> {
    bindings: HashMap<Key, A>,
}

impl<A> Default for Keymap<A> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<A: Copy + Eq + Hash> Keymap<A> {
    /// Create an empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, returning the action it replaced.
    pub fn bind(&mut self, key: Key, action: A) -> Option<A> {
        self.bindings.insert(key, action)
    }

    /// Set a binding using builder pattern.
    pub fn with_binding(mut self, key: Key, action: A) -> Self {
        self.bind(key, action);
        self
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: Key) -> Option<A> {
        self.bindings.remove(&key)
    }

    /// The action bound to `key`.
    pub fn action_for(&self, key: Key) -> Option<A> {
        self.bindings.get(&key).copied()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Actions a trigger performs in response to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerAction {
    FocusNext,
    FocusPrevious,
    FocusFirst,
    FocusLast,
    Toggle,
}

impl Keymap<TriggerAction> {
    /// The standard accordion trigger bindings.
    pub fn trigger_default() -> Self {
        Self::new()
            .with_binding(Key::ArrowDown, TriggerAction::FocusNext)
            .with_binding(Key::ArrowUp, TriggerAction::FocusPrevious)
            .with_binding(Key::Home, TriggerAction::FocusFirst)
            .with_binding(Key::End, TriggerAction::FocusLast)
            .with_binding(Key::Enter, TriggerAction::Toggle)
            .with_binding(Key::Space, TriggerAction::Toggle)
    }
}

/// Actions a panel performs in response to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelAction {
    /// Close the section and return focus to its trigger.
    Close,
}

impl Keymap<PanelAction> {
    /// The standard panel bindings.
    pub fn panel_default() -> Self {
        Self::new().with_binding(Key::Escape, PanelAction::Close)
    }
}
