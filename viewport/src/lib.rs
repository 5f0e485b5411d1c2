//! Pan/zoom viewport engine for diagrams embedded in documentation pages.
//!
//! A diagram renderer leaves an `<svg>` in the page that is often wider or
//! taller than the reader's screen. This crate adopts that markup into a
//! managed group hierarchy and owns the pan/zoom transform applied to it:
//! clamping, pivot-preserving zoom, animated transitions, and the mapping from
//! pointer, wheel, and keyboard gestures to transform updates. It compiles to
//! WebAssembly for the browser and runs natively against an in-memory tree for
//! tests and headless tools.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::ViewportController`], the stateful core |
//! | [`transform`] | Transform state, clamping, and coordinate conversions |
//! | [`animation`] | Eased transitions with supersede semantics |
//! | [`content`] | One-time adoption of the mount point's markup |
//! | [`input`] | Input event types, key bindings, and gesture state |
//! | [`render`] | The [`render::Renderer`] capability trait and an in-memory tree |
//! | [`clock`] | Monotonic time sources |
//! | [`config`] | Tunable settings with validated JSON overrides |
//! | [`web`] | Browser binding via `web-sys` and `wasm-bindgen` |
//! | [`consts`] | Shared numeric constants (scale limits, durations, etc.) |

pub mod animation;
pub mod clock;
pub mod config;
pub mod consts;
pub mod content;
pub mod controller;
pub mod input;
pub mod render;
pub mod transform;
pub mod web;
