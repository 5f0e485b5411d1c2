//! Input model: buttons, modifiers, wheel deltas, key bindings, and the
//! gesture state machine.
//!
//! Hosts translate raw browser events into these types and hand them to the
//! controller. Nothing here touches the transform; it only describes intent.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::config::ViewportConfig;
use crate::transform::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Whether pressing this button starts a pan.
    #[must_use]
    pub fn pans(self) -> bool {
        matches!(self, Self::Primary | Self::Middle)
    }

    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Unit of a wheel delta, mirroring DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    #[must_use]
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Vertical scroll amount (positive = down, i.e. zoom out).
    pub dy: f64,
    pub mode: DeltaMode,
}

impl WheelDelta {
    #[must_use]
    pub fn pixels(dy: f64) -> Self {
        Self { dy, mode: DeltaMode::Pixel }
    }

    /// Multiplicative zoom factor for this delta: `2^(-dy * rate)`.
    ///
    /// Browsers report trackpad pinch as a wheel event with Ctrl held, so Ctrl
    /// scales the rate up to make pinch feel direct.
    #[must_use]
    pub fn zoom_factor(&self, modifiers: Modifiers, config: &ViewportConfig) -> f64 {
        let rate = match self.mode {
            DeltaMode::Pixel => config.wheel_pixel_rate,
            DeltaMode::Line => config.wheel_line_rate,
            DeltaMode::Page => config.wheel_page_rate,
        };
        let pinch = if modifiers.ctrl { config.pinch_multiplier } else { 1.0 };
        (-self.dy * rate * pinch).exp2()
    }
}

/// A keyboard key as reported by the browser (`KeyboardEvent.key`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// What a bound key asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ZoomIn,
    ZoomOut,
    Reset,
}

impl KeyCommand {
    /// Resolve a key press. Bindings need Ctrl or Command:
    /// `=`/`+` zoom in, `-` zooms out, `0` resets.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        if !modifiers.command() {
            return None;
        }
        match key.0.as_str() {
            "=" | "+" => Some(Self::ZoomIn),
            "-" => Some(Self::ZoomOut),
            "0" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Externally visible interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Panning,
    Animating,
}

/// Pointer gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging the diagram.
    Panning {
        /// Screen position of the previous pointer event, for the next delta.
        last_screen: Point,
    },
}
