//! Shared numeric constants for the viewport crate.

// ── Scale bounds ────────────────────────────────────────────────

/// Smallest allowed scale (10%).
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed scale (2000%).
pub const MAX_SCALE: f64 = 20.0;

// ── Zoom steps ──────────────────────────────────────────────────

/// Multiplicative step for keyboard zoom in/out.
pub const ZOOM_STEP: f64 = 1.5;

/// Multiplicative step for double-click zoom.
pub const DOUBLE_CLICK_FACTOR: f64 = 2.0;

// ── Animation ───────────────────────────────────────────────────

/// Duration of pointer- and keyboard-centered zoom animations.
pub const ZOOM_DURATION_MS: f64 = 300.0;

/// Duration of the animated return to identity.
pub const RESET_DURATION_MS: f64 = 500.0;

// ── Wheel ───────────────────────────────────────────────────────

/// Wheel exponent per pixel of scroll (`factor = 2^(-dy * k)`).
pub const WHEEL_PIXEL_RATE: f64 = 0.002;

/// Wheel exponent per line of scroll.
pub const WHEEL_LINE_RATE: f64 = 0.05;

/// Wheel exponent per page of scroll.
pub const WHEEL_PAGE_RATE: f64 = 1.0;

/// Multiplier applied when Ctrl is held; browsers report trackpad pinch this way.
pub const PINCH_MULTIPLIER: f64 = 10.0;

// ── Managed markup ──────────────────────────────────────────────

/// Class of the group that carries the transform attribute.
pub const ZOOM_GROUP_CLASS: &str = "zoom-group";

/// Class of the (never drawn) grid overlay group.
pub const GRID_GROUP_CLASS: &str = "grid-group";

/// Class of the group that holds the adopted diagram markup.
pub const CONTENT_GROUP_CLASS: &str = "content-group";
