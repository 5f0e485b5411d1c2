//! Content adoption: moving a pre-rendered diagram under managed groups.
//!
//! The mount point arrives holding whatever the diagram renderer produced.
//! Adoption serializes that markup, clears the mount, builds
//!
//! ```text
//! mount
//! └── g.zoom-group        (carries the transform)
//!     ├── g.grid-group    (reserved for a grid overlay, left empty)
//!     └── g.content-group (the adopted markup)
//! ```
//!
//! and re-inserts the markup into the content group. Going through text
//! rather than moving live nodes detaches the diagram from any rendering
//! context tied to its original parent.
//!
//! Adoption never fails. A missing mount or empty content is logged and the
//! viewer carries on with nothing to show.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{CONTENT_GROUP_CLASS, GRID_GROUP_CLASS, ZOOM_GROUP_CLASS};
use crate::render::Renderer;

/// Attribute on the mount point declaring the content's coordinate frame.
pub const FRAME_ATTRIBUTE: &str = "viewBox";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameParseError {
    #[error("expected 4 numbers, found {0}")]
    TokenCount(usize),
    #[error("`{0}` is not a finite number")]
    NotANumber(String),
}

/// The adopted content's declared coordinate frame. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FromStr for LogicalFrame {
    type Err = FrameParseError;

    /// Parse `x y width height`, separated by whitespace and/or commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty()).collect();
        if tokens.len() != 4 {
            return Err(FrameParseError::TokenCount(tokens.len()));
        }
        let mut values = [0.0; 4];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => *slot = v,
                _ => return Err(FrameParseError::NotANumber((*token).to_owned())),
            }
        }
        let [x, y, width, height] = values;
        Ok(Self { x, y, width, height })
    }
}

/// The managed group hierarchy created by adoption.
#[derive(Debug, Clone)]
pub struct Surface<N> {
    /// The mount point itself (sized by the resize handler).
    pub root: N,
    /// Carries the `transform` attribute.
    pub zoom_group: N,
    pub grid_group: N,
    /// Holds the adopted markup. Written once, here.
    pub content_group: N,
}

/// Everything adoption produced.
#[derive(Debug, Clone)]
pub struct Adoption<N> {
    pub surface: Option<Surface<N>>,
    pub frame: Option<LogicalFrame>,
    /// Whether non-empty markup was found and moved.
    pub adopted: bool,
}

/// Run the single adoption pass against the renderer's mount point.
pub fn adopt<R: Renderer>(renderer: &mut R) -> Adoption<R::Node> {
    let Some(root) = renderer.mount() else {
        tracing::warn!("no mount point found; viewer starts empty");
        return Adoption { surface: None, frame: None, adopted: false };
    };

    let markup = renderer.inner_markup(&root);
    let adopted = !markup.trim().is_empty();
    if !adopted {
        tracing::warn!("mount point has no content; viewer starts empty");
    }

    let frame = if adopted { declared_frame(renderer, &root) } else { None };

    renderer.remove_children(&root);
    let surface = build_surface(renderer, root.clone());
    if adopted {
        match &surface {
            Some(surface) => renderer.set_inner_markup(&surface.content_group, &markup),
            // Put the diagram back rather than leave the page blank.
            None => renderer.set_inner_markup(&root, &markup),
        }
    }

    tracing::debug!(adopted, has_frame = frame.is_some(), "content adoption complete");
    Adoption { surface, frame, adopted }
}

fn declared_frame<R: Renderer>(renderer: &R, root: &R::Node) -> Option<LogicalFrame> {
    let raw = renderer.attribute(root, FRAME_ATTRIBUTE)?;
    match raw.parse::<LogicalFrame>() {
        Ok(frame) => Some(frame),
        Err(err) => {
            tracing::trace!(%err, raw, "ignoring malformed coordinate frame");
            None
        }
    }
}

fn build_surface<R: Renderer>(renderer: &mut R, root: R::Node) -> Option<Surface<R::Node>> {
    let Some(zoom_group) = managed_group(renderer, &root, ZOOM_GROUP_CLASS) else {
        tracing::warn!("could not create the zoom group; transforms will not be rendered");
        return None;
    };
    let grid_group = managed_group(renderer, &zoom_group, GRID_GROUP_CLASS)?;
    let content_group = managed_group(renderer, &zoom_group, CONTENT_GROUP_CLASS)?;
    Some(Surface { root, zoom_group, grid_group, content_group })
}

fn managed_group<R: Renderer>(renderer: &mut R, parent: &R::Node, class: &str) -> Option<R::Node> {
    let group = renderer.append_group(parent)?;
    renderer.set_attribute(&group, "class", class);
    Some(group)
}
