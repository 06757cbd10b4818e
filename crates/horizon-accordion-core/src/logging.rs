//! Logging and debugging facilities for Horizon Accordion.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output by subsystem
//! - Tree styles used by the state dump formatters
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Horizon Accordion uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_accordion=debug")
//!     .init();
//! ```
//!
//! Committed state transitions are logged at `debug`; policy refusals (a
//! disabled section, the last open section) and ignored stale registrations are
//! logged at `trace`.

/// Span names used throughout Horizon Accordion for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "horizon_accordion::signal";
    /// Open-set transition span.
    pub const TRANSITION: &str = "horizon_accordion::transition";
    /// Accordion construction and validation span.
    pub const BUILD: &str = "horizon_accordion::build";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_accordion_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_accordion_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "horizon_accordion_core::property";
    /// Open-set coordination target.
    pub const COORDINATOR: &str = "horizon_accordion::coordinator";
    /// Trigger registry target.
    pub const REGISTRY: &str = "horizon_accordion::registry";
    /// Section controller target.
    pub const SECTION: &str = "horizon_accordion::section";
    /// Focus navigation target.
    pub const NAVIGATOR: &str = "horizon_accordion::navigator";
    /// Keyboard handling target.
    pub const KEYBOARD: &str = "horizon_accordion::keyboard";
    /// Panel and close control target.
    pub const PANEL: &str = "horizon_accordion::panel";
}

/// Style options for tree-shaped debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-character markers.
    Compact,
}

impl TreeStyle {
    /// The connector drawn in front of a child line.
    pub fn connector(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (TreeStyle::Ascii, false) => "+-- ",
            (TreeStyle::Ascii, true) => "`-- ",
            (TreeStyle::Unicode, false) => "\u{251c}\u{2500}\u{2500} ",
            (TreeStyle::Unicode, true) => "\u{2514}\u{2500}\u{2500} ",
            (TreeStyle::Compact, _) => "- ",
        }
    }
}

/// A guard for timing a section of code.
///
/// The span is active until the guard is dropped.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_accordion::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
