//! Style descriptor extraction.
//!
//! A captured style is a chain of descriptors, one per styled ancestor of
//! the capture element, innermost first. Each descriptor records the shape
//! of an inline wrapper: tag name, attributes, and parsed inline CSS.
//! Reapplying the chain recreates that cascade around new content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vellum_common::warning::warn_once;
use vellum_css::parse_style_text;
use vellum_dom::{DomTree, NodeId};

/// Elements from which styles are never copied: structural containers
/// terminate the cascade instead of contributing to it.
const EXCLUDED_ELEMENTS: &[&str] = &["p", "div", "body", "html"];

/// The kind of structural mutation a descriptor stands for.
///
/// Only inline wrapping exists today; block and object styles would be
/// new variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleKind {
    /// Wrap content in an inline element matching the descriptor.
    Inline,
}

/// A captured style shape: "wrap content in an element matching this".
///
/// Immutable once created. Ordered maps make serialization (serde and
/// generated markup alike) deterministic; insertion order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Lower-cased tag name of the element to create.
    pub tag_name: String,
    /// What kind of mutation applying this descriptor performs.
    pub kind: StyleKind,
    /// Attributes to set on the created element, minus `style`.
    pub attributes: BTreeMap<String, String>,
    /// Parsed inline CSS properties from the source element's `style`.
    pub css: BTreeMap<String, String>,
}

/// Ordered list of descriptors, innermost-first. Applying iterates in
/// stored order, so later (outer) wraps end up outside earlier ones.
pub type StyleChain = Vec<StyleDescriptor>;

/// Convert one element into a style descriptor.
///
/// Returns `None` for non-elements and for the excluded structural
/// containers (`p`, `div`, `body`, `html`) — a filtering rule, not an
/// error. Otherwise reads the element's current attribute state: the
/// `style` attribute is normalized and parsed into a property map
/// (malformed style text degrades to no properties, with a deduplicated
/// warning), every other attribute is copied verbatim, and the tag name
/// is lower-cased. Pure read; no side effects on the tree.
#[must_use]
pub fn descriptor_from_element(tree: &DomTree, id: NodeId) -> Option<StyleDescriptor> {
    let data = tree.as_element(id)?;

    if EXCLUDED_ELEMENTS
        .iter()
        .any(|&excluded| data.has_tag(excluded))
    {
        return None;
    }

    let css = match data.attrs.get("style") {
        Some(style_text) => parse_style_text(style_text).unwrap_or_else(|err| {
            warn_once("Format", &format!("ignoring style attribute: {err}"));
            BTreeMap::new()
        }),
        None => BTreeMap::new(),
    };

    let attributes: BTreeMap<String, String> = data
        .attrs
        .iter()
        .filter(|(name, _)| *name != "style")
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    Some(StyleDescriptor {
        tag_name: data.tag_name.to_ascii_lowercase(),
        kind: StyleKind::Inline,
        attributes,
        css,
    })
}

/// Extract the style chain for an element and its ancestors.
///
/// Do/while walk: convert the current element (which may itself be filtered
/// out), then move to the parent; the walk only terminates when there is no
/// parent or the parent is not an element node. Container exclusion happens
/// per-step inside [`descriptor_from_element`], never by ending the walk
/// early, so styled ancestors above an excluded container still contribute.
///
/// The result may be empty when every ancestor is an excluded container.
#[must_use]
pub fn extract_style_chain(tree: &DomTree, id: NodeId) -> StyleChain {
    let mut styles = StyleChain::new();
    let mut current = Some(id);

    while let Some(element) = current {
        if let Some(descriptor) = descriptor_from_element(tree, element) {
            styles.push(descriptor);
        }
        current = tree.parent(element).filter(|&parent| tree.is_element(parent));
    }

    styles
}
