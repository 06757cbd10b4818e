//! Core systems for Horizon Accordion.
//!
//! This crate provides the reactive building blocks the accordion widgets are
//! made of:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and span helpers shared by every crate
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_accordion_core::Signal;
//!
//! // Create a signal that notifies when a section opens
//! let opened = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = opened.connect(|index| {
//!     println!("Section {} opened", index);
//! });
//!
//! opened.emit(2);
//!
//! // Disconnect when done
//! opened.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use horizon_accordion_core::{Property, Signal};
//!
//! struct Expander {
//!     expanded: Property<bool>,
//!     expanded_changed: Signal<bool>,
//! }
//!
//! impl Expander {
//!     fn toggle(&self) {
//!         let next = !self.expanded.get();
//!         if self.expanded.set(next) {
//!             self.expanded_changed.emit(next);
//!         }
//!     }
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::{PerfSpan, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
