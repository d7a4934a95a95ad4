use glam::Vec2;
use serde::{Deserialize, Serialize};
use vrspace_common::{Hand, Transform};

/// Number of tracked buttons per controller.
pub const BUTTON_COUNT: usize = 5;

/// A named button on a tracked controller.
///
/// `Primary`/`Secondary` are the two face buttons: X/Y on the left
/// controller, A/B on the right, following the WebXR standard gamepad
/// component naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonId {
    Trigger,
    Squeeze,
    Thumbstick,
    Primary,
    Secondary,
}

impl ButtonId {
    /// All buttons in declaration order, for deterministic iteration.
    pub const ALL: [ButtonId; BUTTON_COUNT] = [
        ButtonId::Trigger,
        ButtonId::Squeeze,
        ButtonId::Thumbstick,
        ButtonId::Primary,
        ButtonId::Secondary,
    ];

    /// Index into per-button arrays.
    pub fn index(self) -> usize {
        match self {
            ButtonId::Trigger => 0,
            ButtonId::Squeeze => 1,
            ButtonId::Thumbstick => 2,
            ButtonId::Primary => 3,
            ButtonId::Secondary => 4,
        }
    }

    /// Human-readable label for log lines, hand-dependent for the face
    /// buttons.
    pub fn label(self, hand: Hand) -> &'static str {
        match (self, hand) {
            (ButtonId::Trigger, _) => "trigger",
            (ButtonId::Squeeze, _) => "squeeze",
            (ButtonId::Thumbstick, _) => "thumbstick",
            (ButtonId::Primary, Hand::Left) => "X",
            (ButtonId::Primary, Hand::Right) => "A",
            (ButtonId::Secondary, Hand::Left) => "Y",
            (ButtonId::Secondary, Hand::Right) => "B",
        }
    }
}

/// Pressed state of one button, with an edge flag against the previous poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub pressed: bool,
    pub changed: bool,
}

/// Thumbstick deflection, with an edge flag against the previous poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisState {
    pub x: f32,
    pub y: f32,
    pub changed: bool,
}

/// A raw per-frame controller sample as supplied by the XR runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerInput {
    /// The controller's spatial anchor, used for intersection testing and
    /// as the reparent target when an object is picked up.
    pub grip: Transform,
    pub buttons: [bool; BUTTON_COUNT],
    pub thumbstick: Vec2,
}

impl ControllerInput {
    /// A connected controller with nothing pressed and a centered stick.
    pub fn idle() -> Self {
        Self {
            grip: Transform::default(),
            buttons: [false; BUTTON_COUNT],
            thumbstick: Vec2::ZERO,
        }
    }

    /// Place the grip at the given transform.
    pub fn at_grip(mut self, grip: Transform) -> Self {
        self.grip = grip;
        self
    }

    /// Set one button's pressed state.
    pub fn with_button(mut self, button: ButtonId, pressed: bool) -> Self {
        self.buttons[button.index()] = pressed;
        self
    }

    /// Set the thumbstick deflection.
    pub fn with_thumbstick(mut self, x: f32, y: f32) -> Self {
        self.thumbstick = Vec2::new(x, y);
        self
    }
}

impl Default for ControllerInput {
    fn default() -> Self {
        Self::idle()
    }
}

/// Derived controller state for one poll: every button and the thumbstick
/// with their change flags, plus the grip transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub grip: Transform,
    pub buttons: [ButtonState; BUTTON_COUNT],
    pub thumbstick: AxisState,
}

impl ControllerState {
    /// Derive the state for this poll from a raw sample and the previous
    /// poll's state. A newly connected controller (`prev` is `None`) is
    /// diffed against the all-released, centered baseline.
    pub fn from_input(input: &ControllerInput, prev: Option<&ControllerState>) -> Self {
        let mut buttons = [ButtonState::default(); BUTTON_COUNT];
        for id in ButtonId::ALL {
            let i = id.index();
            let pressed = input.buttons[i];
            let was_pressed = prev.map(|p| p.buttons[i].pressed).unwrap_or(false);
            buttons[i] = ButtonState {
                pressed,
                changed: pressed != was_pressed,
            };
        }
        let prev_stick = prev
            .map(|p| Vec2::new(p.thumbstick.x, p.thumbstick.y))
            .unwrap_or(Vec2::ZERO);
        Self {
            grip: input.grip,
            buttons,
            thumbstick: AxisState {
                x: input.thumbstick.x,
                y: input.thumbstick.y,
                changed: input.thumbstick != prev_stick,
            },
        }
    }

    /// State of one button this poll.
    pub fn button(&self, id: ButtonId) -> ButtonState {
        self.buttons[id.index()]
    }
}
