//! Replay scripts: a list of `command[:args]` steps driven through the controller.
//!
//! ```text
//! zoom-in | zoom-out | reset
//! drag:x0,y0,x1,y1      wheel:x,y,dy       dblclick:x,y
//! resize:w,h            wait:ms            key:ctrl+=
//! ```
//!
//! Time only moves on `wait`, in 16 ms frames, so runs are deterministic.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::str::FromStr;

use viewport::clock::ManualClock;
use viewport::controller::ViewportController;
use viewport::input::{Button, Key, Modifiers, WheelDelta};
use viewport::render::Renderer;
use viewport::transform::Point;

/// Frame length used when advancing time.
pub const FRAME_MS: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("unknown step `{0}`")]
    UnknownStep(String),
    #[error("`{step}` expects {expected} numbers, got `{args}`")]
    BadArgs { step: &'static str, expected: usize, args: String },
    #[error("`key` step needs a key, e.g. `key:ctrl+=`")]
    MissingKey,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    ZoomIn,
    ZoomOut,
    Reset,
    Drag { from: Point, to: Point },
    Wheel { at: Point, dy: f64 },
    DoubleClick { at: Point },
    Resize { width: f64, height: f64 },
    Wait { ms: f64 },
    Key { key: Key, modifiers: Modifiers },
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = s.trim().split_once(':').unwrap_or((s.trim(), ""));
        match name {
            "zoom-in" => Ok(Self::ZoomIn),
            "zoom-out" => Ok(Self::ZoomOut),
            "reset" => Ok(Self::Reset),
            "drag" => {
                let [x0, y0, x1, y1] = numbers::<4>("drag", args)?;
                Ok(Self::Drag { from: Point::new(x0, y0), to: Point::new(x1, y1) })
            }
            "wheel" => {
                let [x, y, dy] = numbers::<3>("wheel", args)?;
                Ok(Self::Wheel { at: Point::new(x, y), dy })
            }
            "dblclick" => {
                let [x, y] = numbers::<2>("dblclick", args)?;
                Ok(Self::DoubleClick { at: Point::new(x, y) })
            }
            "resize" => {
                let [width, height] = numbers::<2>("resize", args)?;
                Ok(Self::Resize { width, height })
            }
            "wait" => {
                let [ms] = numbers::<1>("wait", args)?;
                Ok(Self::Wait { ms })
            }
            "key" => parse_key(args),
            other => Err(ScriptError::UnknownStep(other.to_owned())),
        }
    }
}

fn numbers<const N: usize>(step: &'static str, args: &str) -> Result<[f64; N], ScriptError> {
    let bad = || ScriptError::BadArgs { step, expected: N, args: args.to_owned() };
    let parsed: Vec<f64> = args
        .split(',')
        .map(|t| match t.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(bad()),
        })
        .collect::<Result<_, _>>()?;
    <[f64; N]>::try_from(parsed).map_err(|_| bad())
}

/// `ctrl+=`, `meta+-`, `0`, ... The last `+`-separated token is the key, so
/// `ctrl++` means Ctrl and the `+` key.
fn parse_key(args: &str) -> Result<Step, ScriptError> {
    let args = args.trim();
    if args.is_empty() {
        return Err(ScriptError::MissingKey);
    }
    let (prefix, key) = match args.strip_suffix('+') {
        Some(rest) if rest.is_empty() || rest.ends_with('+') => (rest.trim_end_matches('+'), "+"),
        _ => args.rsplit_once('+').unwrap_or(("", args)),
    };
    if key.is_empty() {
        return Err(ScriptError::MissingKey);
    }
    let mut modifiers = Modifiers::default();
    for token in prefix.split('+').filter(|t| !t.is_empty()) {
        match token {
            "ctrl" => modifiers.ctrl = true,
            "meta" | "cmd" => modifiers.meta = true,
            "shift" => modifiers.shift = true,
            "alt" => modifiers.alt = true,
            other => return Err(ScriptError::UnknownStep(format!("key modifier `{other}`"))),
        }
    }
    Ok(Step::Key { key: Key::new(key), modifiers })
}

/// Parse every step, failing on the first bad one.
///
/// # Errors
///
/// Returns the first step that does not parse.
pub fn parse(steps: &[String]) -> Result<Vec<Step>, ScriptError> {
    steps.iter().map(|s| s.parse()).collect()
}

/// Drive `controller` through `steps`, then let any animation settle.
pub fn run<R: Renderer>(controller: &mut ViewportController<R, ManualClock>, clock: &ManualClock, steps: &[Step]) {
    for step in steps {
        tracing::debug!(?step, "replaying");
        match step {
            Step::ZoomIn => controller.zoom_in(),
            Step::ZoomOut => controller.zoom_out(),
            Step::Reset => controller.reset_view(),
            Step::Drag { from, to } => {
                controller.on_pointer_down(*from, Button::Primary);
                controller.on_pointer_move(*to);
                controller.on_pointer_up(*to);
            }
            Step::Wheel { at, dy } => {
                controller.on_wheel(*at, WheelDelta::pixels(*dy), Modifiers::default());
            }
            Step::DoubleClick { at } => {
                controller.on_double_click(*at);
            }
            Step::Resize { width, height } => controller.resize_to(*width, *height),
            Step::Wait { ms } => advance(controller, clock, *ms),
            Step::Key { key, modifiers } => {
                controller.on_key_down(key, *modifiers);
            }
        }
    }
    settle(controller, clock);
}

/// Advance time by `ms` in whole frames, ticking after each.
fn advance<R: Renderer>(controller: &mut ViewportController<R, ManualClock>, clock: &ManualClock, ms: f64) {
    let mut remaining = ms;
    while remaining > 0.0 {
        let step = remaining.min(FRAME_MS);
        clock.advance(step);
        controller.tick();
        remaining -= step;
    }
}

fn settle<R: Renderer>(controller: &mut ViewportController<R, ManualClock>, clock: &ManualClock) {
    while controller.tick() {
        clock.advance(FRAME_MS);
    }
}
