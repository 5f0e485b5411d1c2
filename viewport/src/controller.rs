use crate::animation::AnimationScheduler;
use crate::clock::Clock;
use crate::config::ViewportConfig;
use crate::content::{self, LogicalFrame, Surface};
use crate::input::{Button, InputState, Key, KeyCommand, Modifiers, ViewState, WheelDelta};
use crate::render::Renderer;
use crate::transform::{Point, ScaleBounds, Transform, Viewport};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// Notifications returned from input handlers for the host to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `Idle -> Panning`; hosts typically show a "grabbing" cursor.
    PanStarted,
    /// `Panning -> Idle`.
    PanEnded,
    /// An animation is in flight; call [`ViewportController::tick`] every frame until it returns `false`.
    AnimationRequested,
    /// The event was handled; the host should suppress the browser default.
    Consumed,
}

/// The pan/zoom engine for one mounted diagram.
///
/// Sole owner and writer of the transform. Every public operation leaves the
/// scale inside the configured bounds and the controller in a usable state.
pub struct ViewportController<R: Renderer, C: Clock> {
    renderer: R,
    clock: C,
    config: ViewportConfig,
    bounds: ScaleBounds,
    transform: Transform,
    viewport: Viewport,
    surface: Option<Surface<R::Node>>,
    frame: Option<LogicalFrame>,
    input: InputState,
    scheduler: AnimationScheduler,
}

impl<R: Renderer, C: Clock> ViewportController<R, C> {
    /// Measure the surface, adopt the mount point's content, and render identity.
    ///
    /// Never fails: missing or empty content yields an empty, still-interactive
    /// viewer, and an invalid `config` is replaced by the defaults.
    pub fn new(renderer: R, clock: C, config: ViewportConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                tracing::warn!(%err, "invalid viewport config; using defaults");
                ViewportConfig::default()
            }
        };
        let mut controller = Self {
            renderer,
            clock,
            bounds: config.bounds(),
            config,
            transform: Transform::IDENTITY,
            viewport: Viewport::default(),
            surface: None,
            frame: None,
            input: InputState::Idle,
            scheduler: AnimationScheduler::new(),
        };
        let adoption = content::adopt(&mut controller.renderer);
        controller.surface = adoption.surface;
        controller.frame = adoption.frame;
        controller.handle_resize();
        controller.render();
        controller
    }

    // --- Public commands ---

    /// Animated zoom in by one step, centered on the viewport.
    pub fn zoom_in(&mut self) {
        let step = self.config.zoom_step;
        self.animate_scale_at(self.viewport.center(), step);
    }

    /// Animated zoom out by one step, centered on the viewport.
    pub fn zoom_out(&mut self) {
        let step = self.config.zoom_step;
        self.animate_scale_at(self.viewport.center(), 1.0 / step);
    }

    /// Animated return to the identity transform.
    pub fn reset_view(&mut self) {
        let duration = self.config.reset_duration_ms;
        self.animate_to(Transform::IDENTITY, duration);
    }

    /// Re-measure the surface and advertise the new size. The transform is untouched.
    pub fn handle_resize(&mut self) {
        let size = self.renderer.surface_size();
        self.resize_to(size.width, size.height);
    }

    /// Apply explicit surface dimensions. The transform is untouched.
    pub fn resize_to(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        if let Some(surface) = &self.surface {
            self.renderer.set_attribute(&surface.root, "width", &width.to_string());
            self.renderer.set_attribute(&surface.root, "height", &height.to_string());
        }
        tracing::debug!(width, height, "viewport resized");
    }

    /// Toggle the grid overlay flag. Nothing is drawn for it yet.
    pub fn set_grid_visible(&mut self, visible: bool) {
        self.config.grid_visible = visible;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !button.pans() {
            return Vec::new();
        }
        self.cancel_animation();
        let mut actions = Vec::new();
        if matches!(self.input, InputState::Idle) {
            actions.push(Action::PanStarted);
        }
        self.input = InputState::Panning { last_screen: screen_pt };
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Panning { last_screen } = self.input else {
            return Vec::new();
        };
        let next = self.transform.translated(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
        self.input = InputState::Panning { last_screen: screen_pt };
        self.apply(next);
        Vec::new()
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        if !matches!(self.input, InputState::Panning { .. }) {
            return Vec::new();
        }
        self.on_pointer_move(screen_pt);
        self.input = InputState::Idle;
        vec![Action::PanEnded]
    }

    /// Immediate (unanimated) zoom around the pointer.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.cancel_animation();
        let factor = delta.zoom_factor(modifiers, &self.config);
        let next = self.transform.scale_at(screen_pt, factor, &self.bounds);
        self.apply(next);
        vec![Action::Consumed]
    }

    /// Animated zoom around the clicked point.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let was_panning = self.state() == ViewState::Panning;
        let factor = self.config.double_click_factor;
        self.animate_scale_at(screen_pt, factor);
        animated_command_actions(was_panning)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let Some(command) = KeyCommand::from_key(key, modifiers) else {
            return Vec::new();
        };
        let was_panning = self.state() == ViewState::Panning;
        match command {
            KeyCommand::ZoomIn => self.zoom_in(),
            KeyCommand::ZoomOut => self.zoom_out(),
            KeyCommand::Reset => self.reset_view(),
        }
        animated_command_actions(was_panning)
    }

    // --- Frame ---

    /// Apply the in-flight animation's value for "now".
    ///
    /// Returns `true` while more frames are needed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let Some(frame) = self.scheduler.tick(now) else {
            return false;
        };
        self.apply(frame.transform);
        if frame.finished {
            tracing::debug!(transform = %frame.transform, "animation finished");
        }
        !frame.finished
    }

    // --- Queries ---

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn logical_frame(&self) -> Option<LogicalFrame> {
        self.frame
    }

    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    #[must_use]
    pub fn grid_visible(&self) -> bool {
        self.config.grid_visible
    }

    /// Managed groups, or `None` when there was no mount point.
    #[must_use]
    pub fn surface(&self) -> Option<&Surface<R::Node>> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        match self.input {
            InputState::Panning { .. } => ViewState::Panning,
            InputState::Idle if self.scheduler.is_active() => ViewState::Animating,
            InputState::Idle => ViewState::Idle,
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_active()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable host access, e.g. to update what `surface_size` reports.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // --- Internals ---

    /// The value on screen right now, including an in-flight animation.
    fn current(&self, now_ms: f64) -> Transform {
        self.scheduler.sample(now_ms).unwrap_or(self.transform)
    }

    fn animate_scale_at(&mut self, pivot: Point, factor: f64) {
        let now = self.clock.now_ms();
        let target = self.current(now).scale_at(pivot, factor, &self.bounds);
        let duration = self.config.zoom_duration_ms;
        self.animate_to(target, duration);
    }

    fn animate_to(&mut self, target: Transform, duration_ms: f64) {
        let now = self.clock.now_ms();
        // Panning ends when an animated command takes over.
        self.input = InputState::Idle;
        let from = self.scheduler.animate_to(self.transform, target, duration_ms, now);
        self.apply(from);
        tracing::debug!(from = %from, to = %target, duration_ms, "animation started");
    }

    /// Freeze an in-flight animation at its current value.
    fn cancel_animation(&mut self) {
        let now = self.clock.now_ms();
        if let Some(current) = self.scheduler.cancel(now) {
            self.apply(current);
            tracing::debug!(transform = %current, "animation cancelled");
        }
    }

    fn apply(&mut self, next: Transform) {
        self.transform = Transform { scale: self.bounds.clamp(next.scale), ..next };
        self.render();
    }

    fn render(&mut self) {
        if let Some(surface) = &self.surface {
            self.renderer.set_attribute(&surface.zoom_group, "transform", &self.transform.to_string());
        }
    }
}

fn animated_command_actions(was_panning: bool) -> Vec<Action> {
    let mut actions = Vec::with_capacity(3);
    if was_panning {
        actions.push(Action::PanEnded);
    }
    actions.push(Action::Consumed);
    actions.push(Action::AnimationRequested);
    actions
}
