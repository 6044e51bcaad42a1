//! Copy-formatting core for the Vellum editing engine.
//!
//! # Scope
//!
//! This crate implements the two sides of "copy formatting" on a
//! rich-text editing surface:
//!
//! - **Style capture** — convert the element under the caret and its
//!   styled ancestors into a chain of [`StyleDescriptor`]s (tag,
//!   attributes, parsed inline CSS), innermost first, skipping structural
//!   containers ([`extract_style_chain`]).
//!
//! - **Style application** — replay a captured chain over a selection as
//!   inline wrapping mutations, resolving the word under a collapsed
//!   caret first ([`selected_word_boundary`]) and restoring the user's
//!   selection afterward ([`apply_format`]).
//!
//! The [`CopyFormatting`] command pair ties these together with the
//! tri-state toggle semantics a toolbar renders. Everything UI — button
//! registration, keystroke chords, icons, localization — lives in the
//! caller; this crate only exposes the operations and the state.
//!
//! # Failure model
//!
//! Nothing here is fatal. Missing selection, unresolvable word, empty
//! chain, container-tagged element: every failure path is a silent no-op
//! returning control to the caller. Malformed inline style text degrades
//! to an empty property map with a deduplicated warning.

/// Inline style application over a selection.
pub mod apply;
/// The copy/apply command pair and its tri-state.
pub mod command;
/// Style descriptor extraction from elements and their ancestors.
pub mod descriptor;
/// Ranges, selections, and mutation-surviving selection snapshots.
pub mod selection;
/// Word-boundary resolution around a collapsed caret.
pub mod word;

// Re-exports for convenience
pub use apply::{apply_format, apply_style};
pub use command::{CommandState, CopyFormatting, InvocationSource};
pub use descriptor::{StyleChain, StyleDescriptor, StyleKind, descriptor_from_element, extract_style_chain};
pub use selection::{EditingContext, Position, Range, SavedSelection, Selection};
pub use word::{WordBoundary, selected_word_boundary};
