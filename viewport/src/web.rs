//! Browser binding: `web-sys` renderer and the exported navigator.
//!
//! Page bootstrap and event listener wiring stay in the host page; it creates
//! an [`SvgNavigator`] once the diagram has rendered and forwards events:
//!
//! ```js
//! const nav = new SvgNavigator("svg-container");
//! window.addEventListener("resize", () => nav.handleResize());
//! svg.addEventListener("pointerdown", (e) => nav.pointerDown(e.offsetX, e.offsetY, e.button));
//! ```
//!
//! DOM call failures are logged and otherwise ignored; none of them can leave
//! the navigator unusable. The first navigator built routes `tracing` output
//! to the browser console.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Performance, Window};

use crate::clock::Clock;
use crate::config::ViewportConfig;
use crate::controller::{Action, ViewportController};
use crate::input::{Button, DeltaMode, Key, Modifiers, WheelDelta};
use crate::render::Renderer;
use crate::transform::{Point, Viewport};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

static CONSOLE_LOGGING: Once = Once::new();

/// Send `tracing` events to `console.*`. Later calls are no-ops.
fn install_console_logging() {
    CONSOLE_LOGGING.call_once(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_writer(MakeWebConsoleWriter::new());
        if let Err(err) = tracing_subscriber::registry().with(layer).try_init() {
            tracing::debug!(%err, "tracing subscriber already installed by the host");
        }
    });
}

/// [`Renderer`] over the live DOM. The mount point is the first `svg` inside
/// the container.
#[derive(Debug, Clone)]
pub struct DomRenderer {
    window: Option<Window>,
    document: Option<Document>,
    mount: Option<Element>,
}

impl DomRenderer {
    /// Resolve `.{container_class} svg` in the current document.
    #[must_use]
    pub fn from_container_class(container_class: &str) -> Self {
        let window = web_sys::window();
        let document = window.as_ref().and_then(Window::document);
        let selector = format!(".{container_class} svg");
        let mount = match document.as_ref().map(|d| d.query_selector(&selector)) {
            Some(Ok(found)) => found,
            Some(Err(err)) => {
                tracing::warn!(selector, error = ?err, "mount point query failed");
                None
            }
            None => None,
        };
        Self { window, document, mount }
    }
}

impl Renderer for DomRenderer {
    type Node = Element;

    fn mount(&self) -> Option<Element> {
        self.mount.clone()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            tracing::warn!(name, error = ?err, "set_attribute failed");
        }
    }

    fn append_group(&mut self, parent: &Element) -> Option<Element> {
        let document = self.document.as_ref()?;
        let group = match document.create_element_ns(Some(SVG_NS), "g") {
            Ok(group) => group,
            Err(err) => {
                tracing::warn!(error = ?err, "could not create group element");
                return None;
            }
        };
        if let Err(err) = parent.append_child(&group) {
            tracing::warn!(error = ?err, "could not append group element");
            return None;
        }
        Some(group)
    }

    fn remove_children(&mut self, node: &Element) {
        node.set_inner_html("");
    }

    fn inner_markup(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_markup(&mut self, node: &Element, markup: &str) {
        node.set_inner_html(markup);
    }

    fn surface_size(&self) -> Viewport {
        let Some(window) = &self.window else {
            return Viewport::default();
        };
        let width = window.inner_width().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
        let height = window.inner_height().map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
        Viewport::new(width, height)
    }
}

/// `performance.now()`, falling back to `Date.now()` where unavailable.
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self { performance: web_sys::window().and_then(|w| w.performance()) }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.as_ref().map_or_else(js_sys::Date::now, Performance::now)
    }
}

/// Pan/zoom navigator exported to JavaScript.
#[wasm_bindgen]
pub struct SvgNavigator {
    controller: ViewportController<DomRenderer, PerformanceClock>,
}

impl SvgNavigator {
    fn build(container_class: &str, config: ViewportConfig) -> Self {
        install_console_logging();
        let renderer = DomRenderer::from_container_class(container_class);
        Self { controller: ViewportController::new(renderer, PerformanceClock::default(), config) }
    }
}

#[wasm_bindgen]
impl SvgNavigator {
    /// Adopt the `svg` inside `.{container_class}` with default settings.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(container_class: &str) -> Self {
        Self::build(container_class, ViewportConfig::default())
    }

    /// Like the constructor, with settings overridden from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(container_class: &str, config_json: &str) -> Result<SvgNavigator, JsError> {
        let config = ViewportConfig::from_json(config_json).map_err(|err| JsError::new(&err.to_string()))?;
        Ok(Self::build(container_class, config))
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) {
        self.controller.zoom_in();
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) {
        self.controller.zoom_out();
    }

    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&mut self) {
        self.controller.reset_view();
    }

    #[wasm_bindgen(js_name = handleResize)]
    pub fn handle_resize(&mut self) {
        self.controller.handle_resize();
    }

    /// Returns `true` when a pan started (show the grabbing cursor).
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16) -> bool {
        has(&self.controller.on_pointer_down(Point::new(x, y), Button::from_dom(button)), Action::PanStarted)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.controller.on_pointer_move(Point::new(x, y));
    }

    /// Returns `true` when a pan ended (restore the cursor).
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        has(&self.controller.on_pointer_up(Point::new(x, y)), Action::PanEnded)
    }

    /// Returns `true` when the host should call `preventDefault`.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64, delta_mode: u32, ctrl: bool) -> bool {
        let delta = WheelDelta { dy: delta_y, mode: DeltaMode::from_dom(delta_mode) };
        let modifiers = Modifiers { ctrl, ..Modifiers::default() };
        has(&self.controller.on_wheel(Point::new(x, y), delta, modifiers), Action::Consumed)
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, x: f64, y: f64) -> bool {
        has(&self.controller.on_double_click(Point::new(x, y)), Action::Consumed)
    }

    /// Returns `true` when the key was bound and the host should call `preventDefault`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: String, ctrl: bool, meta: bool) -> bool {
        let modifiers = Modifiers { ctrl, meta, ..Modifiers::default() };
        has(&self.controller.on_key_down(&Key(key), modifiers), Action::Consumed)
    }

    /// Advance the current animation. Call from `requestAnimationFrame` while it returns `true`.
    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    #[wasm_bindgen(getter, js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.controller.transform().scale
    }

    #[wasm_bindgen(getter, js_name = translateX)]
    pub fn translate_x(&self) -> f64 {
        self.controller.transform().translate_x
    }

    #[wasm_bindgen(getter, js_name = translateY)]
    pub fn translate_y(&self) -> f64 {
        self.controller.transform().translate_y
    }
}

fn has(actions: &[Action], wanted: Action) -> bool {
    actions.contains(&wanted)
}
