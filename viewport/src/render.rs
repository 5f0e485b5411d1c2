//! Rendering: the capability interface the controller draws through.
//!
//! The controller never talks to a DOM or graphics API directly. Everything it
//! needs (read and write attributes, append a group, clear children, move
//! markup around as text, and measure the surface) goes through [`Renderer`].
//! [`crate::web::DomRenderer`] binds it to the browser; [`MarkupTree`] is an
//! in-memory tree used by tests and by headless tools.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;
use std::fmt::Write as _;

use crate::transform::Viewport;

/// Host graphics/DOM capabilities used by the controller and content adapter.
pub trait Renderer {
    /// Handle to a node in the host tree.
    type Node: Clone + fmt::Debug;

    /// The mount point the viewer manages, if the host found one.
    fn mount(&self) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Append a new, empty group element under `parent` and return it.
    fn append_group(&mut self, parent: &Self::Node) -> Option<Self::Node>;

    fn remove_children(&mut self, node: &Self::Node);

    /// Serialized markup of everything under `node`, excluding `node` itself.
    fn inner_markup(&self, node: &Self::Node) -> String;

    /// Replace everything under `node` with parsed `markup`.
    fn set_inner_markup(&mut self, node: &Self::Node, markup: &str);

    /// Current size of the rendering surface.
    fn surface_size(&self) -> Viewport;
}

/// Index of an element inside a [`MarkupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum Child {
    Element(NodeId),
    /// Opaque markup inserted by `set_inner_markup`; never parsed.
    Markup(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Child>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self { tag: tag.to_owned(), attributes: Vec::new(), children: Vec::new() }
    }
}

/// Arena-backed element tree implementing [`Renderer`] without a browser.
///
/// Markup handed to `set_inner_markup` is kept verbatim as an opaque child, so
/// adopting a diagram and serializing it again reproduces the original text.
#[derive(Debug, Clone)]
pub struct MarkupTree {
    nodes: Vec<Element>,
    mount: Option<NodeId>,
    surface: Viewport,
}

impl MarkupTree {
    /// A tree with no mount point at all.
    #[must_use]
    pub fn without_mount(surface: Viewport) -> Self {
        Self { nodes: Vec::new(), mount: None, surface }
    }

    /// A tree whose mount point is a `tag` element carrying `attributes` and
    /// holding `inner` as its existing content.
    #[must_use]
    pub fn with_mount<I, K, V>(tag: &str, attributes: I, inner: &str, surface: Viewport) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut root = Element::new(tag);
        root.attributes = attributes.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        if !inner.is_empty() {
            root.children.push(Child::Markup(inner.to_owned()));
        }
        Self { nodes: vec![root], mount: Some(NodeId(0)), surface }
    }

    /// Change what `surface_size` reports, as a window resize would.
    pub fn set_surface_size(&mut self, width: f64, height: f64) {
        self.surface = Viewport::new(width, height);
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|e| e.tag.as_str())
    }

    /// Element children of `node`, in document order.
    #[must_use]
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|e| {
                e.children
                    .iter()
                    .filter_map(|c| match c {
                        Child::Element(id) => Some(*id),
                        Child::Markup(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Full markup of `node`, including its own tag.
    #[must_use]
    pub fn serialize(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_element(node, &mut out);
        out
    }

    fn write_element(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.nodes.get(node.0) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            // Writing into a String cannot fail.
            if write!(out, " {name}=\"{}\"", escape_attribute(value)).is_err() {
                return;
            }
        }
        out.push('>');
        self.write_children(node, out);
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    fn write_children(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.nodes.get(node.0) else {
            return;
        };
        for child in &element.children {
            match child {
                Child::Element(id) => self.write_element(*id, out),
                Child::Markup(markup) => out.push_str(markup),
            }
        }
    }
}

impl Renderer for MarkupTree {
    type Node = NodeId;

    fn mount(&self) -> Option<NodeId> {
        self.mount
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(node.0)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        let Some(element) = self.nodes.get_mut(node.0) else {
            return;
        };
        if let Some(slot) = element.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_owned();
        } else {
            element.attributes.push((name.to_owned(), value.to_owned()));
        }
    }

    fn append_group(&mut self, parent: &NodeId) -> Option<NodeId> {
        if parent.0 >= self.nodes.len() {
            return None;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new("g"));
        self.nodes[parent.0].children.push(Child::Element(id));
        Some(id)
    }

    fn remove_children(&mut self, node: &NodeId) {
        if let Some(element) = self.nodes.get_mut(node.0) {
            element.children.clear();
        }
    }

    fn inner_markup(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.write_children(*node, &mut out);
        out
    }

    fn set_inner_markup(&mut self, node: &NodeId, markup: &str) {
        let Some(element) = self.nodes.get_mut(node.0) else {
            return;
        };
        element.children.clear();
        if !markup.is_empty() {
            element.children.push(Child::Markup(markup.to_owned()));
        }
    }

    fn surface_size(&self) -> Viewport {
        self.surface
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}
