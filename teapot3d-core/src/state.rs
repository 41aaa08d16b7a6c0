/// Rotation state and the interaction mode machine
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RendererConfig;
use crate::math::Vec3;

/// Rotation axis selectable while auto-rotating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// X -> Y -> Z -> X
    pub fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    TitleScreen,
    Interactive,
    AutoRotating { axis: Axis },
}

impl Mode {
    /// Short label for the HUD
    pub fn label(&self) -> String {
        match self {
            Mode::TitleScreen => "Title".to_string(),
            Mode::Interactive => "Manual".to_string(),
            Mode::AutoRotating { axis } => format!("Auto {}", axis),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Press,
    Repeat,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
}

/// Immutable record delivered by the host through the event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub key: Key,
}

impl InputEvent {
    pub fn new(kind: InputKind, key: Key) -> Self {
        Self { kind, key }
    }

    pub fn press(key: Key) -> Self {
        Self::new(InputKind::Press, key)
    }
}

/// What the frame driver must do after an input was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed
    None,
    /// State changed; the next step renders
    Redraw,
    /// Left the title screen; run the wake-up burst
    WakeUp,
    Exit,
}

/// The single live renderer state
#[derive(Debug, Clone)]
pub struct RenderState {
    /// Radians per axis, accumulated without wraparound
    pub rotation: Vec3,
    pub scale: f32,
    /// Camera-space translation
    pub position: Vec3,
    pub render_needed: bool,
    mode: Mode,
}

impl RenderState {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            rotation: Vec3::zeros(),
            scale: config.scale,
            position: config.position(),
            render_needed: true,
            mode: Mode::TitleScreen,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Add per-axis deltas (radians) and mark the frame stale
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vec3::new(dx, dy, dz);
        self.render_needed = true;
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = Vec3::zeros();
        self.render_needed = true;
    }

    fn set_mode(&mut self, mode: Mode) {
        info!("Mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.render_needed = true;
    }

    /// Advance the active auto-rotate axis by `step` radians.
    /// Returns false outside auto-rotate mode.
    pub fn auto_rotate_tick(&mut self, step: f32) -> bool {
        match self.mode {
            Mode::AutoRotating { axis } => {
                match axis {
                    Axis::X => self.rotate(step, 0.0, 0.0),
                    Axis::Y => self.rotate(0.0, step, 0.0),
                    Axis::Z => self.rotate(0.0, 0.0, step),
                }
                true
            }
            _ => false,
        }
    }

    /// Apply one input event according to the current mode
    pub fn handle_input(&mut self, event: InputEvent, config: &RendererConfig) -> Transition {
        if event.key == Key::Back {
            return if event.kind == InputKind::Press {
                Transition::Exit
            } else {
                Transition::None
            };
        }

        match self.mode {
            Mode::TitleScreen => self.on_title_input(event),
            Mode::Interactive => self.on_interactive_input(event, config),
            Mode::AutoRotating { axis } => self.on_auto_input(event, axis),
        }
    }

    fn on_title_input(&mut self, event: InputEvent) -> Transition {
        if event.kind != InputKind::Press {
            return Transition::None;
        }
        self.set_mode(Mode::Interactive);
        self.rotation = Vec3::zeros();
        Transition::WakeUp
    }

    fn on_interactive_input(&mut self, event: InputEvent, config: &RendererConfig) -> Transition {
        let step = config.angle_increment;
        match (event.kind, event.key) {
            (InputKind::Press | InputKind::Repeat, Key::Up) => self.rotate(step, 0.0, 0.0),
            (InputKind::Press | InputKind::Repeat, Key::Down) => self.rotate(-step, 0.0, 0.0),
            (InputKind::Press | InputKind::Repeat, Key::Left) => self.rotate(0.0, -step, 0.0),
            (InputKind::Press | InputKind::Repeat, Key::Right) => self.rotate(0.0, step, 0.0),
            (InputKind::Press, Key::Confirm) => self.reset_rotation(),
            (InputKind::LongPress, Key::Confirm) => self.set_mode(Mode::AutoRotating {
                axis: config.auto_rotate_axis,
            }),
            _ => return Transition::None,
        }
        Transition::Redraw
    }

    fn on_auto_input(&mut self, event: InputEvent, axis: Axis) -> Transition {
        match (event.kind, event.key) {
            (InputKind::Press, Key::Confirm) => {
                self.set_mode(Mode::AutoRotating { axis: axis.next() })
            }
            (InputKind::LongPress, Key::Confirm) => self.set_mode(Mode::Interactive),
            _ => return Transition::None,
        }
        Transition::Redraw
    }
}
