//! Loading an SVG file into an in-memory mount point.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use viewport::render::MarkupTree;
use viewport::transform::Viewport;

#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("failed to parse svg xml: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),
}

/// Build a [`MarkupTree`] whose mount point is the document's root `<svg>`,
/// holding the root's children verbatim.
///
/// # Errors
///
/// Returns an error if the text is not well-formed XML or the root is not `svg`.
pub fn load(text: &str, surface: Viewport) -> Result<MarkupTree, SvgError> {
    let options = roxmltree::ParsingOptions { allow_dtd: true, ..roxmltree::ParsingOptions::default() };
    let doc = roxmltree::Document::parse_with_options(text, options)?;
    let root = doc.root_element();
    let tag = root.tag_name().name();
    if tag != "svg" {
        return Err(SvgError::NotSvg(tag.to_owned()));
    }

    let mut attributes: Vec<(String, String)> = Vec::new();
    if let Some(ns) = root.tag_name().namespace() {
        attributes.push(("xmlns".to_owned(), ns.to_owned()));
    }
    attributes.extend(root.attributes().map(|a| (a.name().to_owned(), a.value().to_owned())));

    let inner = match (root.first_child(), root.last_child()) {
        (Some(first), Some(last)) => &text[first.range().start..last.range().end],
        _ => "",
    };
    Ok(MarkupTree::with_mount("svg", attributes, inner, surface))
}
