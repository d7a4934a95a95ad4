use serde::{Deserialize, Serialize};
use vrspace_common::Hand;

use crate::state::{ButtonId, ControllerInput, ControllerState};

/// One frame's worth of raw controller samples, indexed by hand.
/// `None` means the controller is not connected this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub controllers: [Option<ControllerInput>; Hand::COUNT],
}

impl FrameInput {
    /// A frame with no controllers connected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach a controller sample for one hand.
    pub fn with_hand(mut self, hand: Hand, input: ControllerInput) -> Self {
        self.controllers[hand.index()] = Some(input);
        self
    }

    /// The raw sample for one hand, if connected.
    pub fn get(&self, hand: Hand) -> Option<&ControllerInput> {
        self.controllers[hand.index()].as_ref()
    }
}

/// A change observed between two polls, tagged by hand and control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// A controller became tracked.
    Connected { hand: Hand },
    /// A controller stopped being tracked.
    Disconnected { hand: Hand },
    /// A button crossed a press or release edge.
    Button {
        hand: Hand,
        button: ButtonId,
        pressed: bool,
    },
    /// The thumbstick deflection changed.
    Axis { hand: Hand, x: f32, y: f32 },
}

/// Tracks both controllers across polls and turns raw frame samples into
/// edge-triggered control events.
///
/// The rig holds the only input state in the system: the previous poll per
/// hand. Handlers downstream are stateless over this queue.
#[derive(Debug, Clone, Default)]
pub struct InputRig {
    hands: [Option<ControllerState>; Hand::COUNT],
}

impl InputRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent derived state for one hand, if connected.
    pub fn controller(&self, hand: Hand) -> Option<&ControllerState> {
        self.hands[hand.index()].as_ref()
    }

    /// Ingest one frame of raw samples and return the ordered list of
    /// changes since the previous poll.
    ///
    /// A hand with no sample contributes nothing; its tracked state is
    /// dropped so a later reconnect is diffed against the released
    /// baseline.
    pub fn poll(&mut self, frame: &FrameInput) -> Vec<ControlEvent> {
        let mut events = Vec::new();
        for hand in Hand::BOTH {
            let slot = &mut self.hands[hand.index()];
            match frame.get(hand) {
                None => {
                    if slot.take().is_some() {
                        events.push(ControlEvent::Disconnected { hand });
                    }
                }
                Some(input) => {
                    if slot.is_none() {
                        events.push(ControlEvent::Connected { hand });
                    }
                    let state = ControllerState::from_input(input, slot.as_ref());
                    for button in ButtonId::ALL {
                        let bs = state.button(button);
                        if bs.changed {
                            events.push(ControlEvent::Button {
                                hand,
                                button,
                                pressed: bs.pressed,
                            });
                        }
                    }
                    if state.thumbstick.changed {
                        events.push(ControlEvent::Axis {
                            hand,
                            x: state.thumbstick.x,
                            y: state.thumbstick.y,
                        });
                    }
                    *slot = Some(state);
                }
            }
        }
        events
    }
}

/// Emit the human-readable log line for one control event.
///
/// Button and axis edges log at `info`; connection lifecycle logs at
/// `debug`.
pub fn log_event(event: &ControlEvent) {
    match event {
        ControlEvent::Connected { hand } => {
            tracing::debug!("{hand} controller connected");
        }
        ControlEvent::Disconnected { hand } => {
            tracing::debug!("{hand} controller disconnected");
        }
        ControlEvent::Button {
            hand,
            button,
            pressed,
        } => {
            let action = if *pressed { "pressed" } else { "released" };
            tracing::info!("{hand} {} {action}", button.label(*hand));
        }
        ControlEvent::Axis { hand, x, y } => {
            tracing::info!("{hand} thumbstick axis: ({x},{y})");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_only(input: ControllerInput) -> FrameInput {
        FrameInput::empty().with_hand(Hand::Right, input)
    }

    #[test]
    fn disconnected_hand_produces_no_events() {
        let mut rig = InputRig::new();
        let events = rig.poll(&FrameInput::empty());
        assert!(events.is_empty());
    }

    #[test]
    fn connection_is_reported_once() {
        let mut rig = InputRig::new();
        let events = rig.poll(&right_only(ControllerInput::idle()));
        assert_eq!(
            events,
            vec![ControlEvent::Connected { hand: Hand::Right }]
        );

        let events = rig.poll(&right_only(ControllerInput::idle()));
        assert!(events.is_empty());
    }

    #[test]
    fn press_and_release_edges() {
        let mut rig = InputRig::new();
        rig.poll(&right_only(ControllerInput::idle()));

        let pressed = right_only(ControllerInput::idle().with_button(ButtonId::Trigger, true));
        let events = rig.poll(&pressed);
        assert_eq!(
            events,
            vec![ControlEvent::Button {
                hand: Hand::Right,
                button: ButtonId::Trigger,
                pressed: true,
            }]
        );

        // Held across a poll: no event.
        assert!(rig.poll(&pressed).is_empty());

        let events = rig.poll(&right_only(ControllerInput::idle()));
        assert_eq!(
            events,
            vec![ControlEvent::Button {
                hand: Hand::Right,
                button: ButtonId::Trigger,
                pressed: false,
            }]
        );
    }

    #[test]
    fn axis_events_only_on_change() {
        let mut rig = InputRig::new();
        rig.poll(&right_only(ControllerInput::idle()));

        let deflected = right_only(ControllerInput::idle().with_thumbstick(0.5, -0.5));
        let events = rig.poll(&deflected);
        assert_eq!(
            events,
            vec![ControlEvent::Axis {
                hand: Hand::Right,
                x: 0.5,
                y: -0.5,
            }]
        );

        assert!(rig.poll(&deflected).is_empty());
    }

    #[test]
    fn left_hand_sorts_before_right() {
        let mut rig = InputRig::new();
        let both = FrameInput::empty()
            .with_hand(Hand::Left, ControllerInput::idle())
            .with_hand(Hand::Right, ControllerInput::idle());
        let events = rig.poll(&both);
        assert_eq!(
            events,
            vec![
                ControlEvent::Connected { hand: Hand::Left },
                ControlEvent::Connected { hand: Hand::Right },
            ]
        );
    }

    #[test]
    fn disconnect_drops_tracked_state() {
        let mut rig = InputRig::new();
        let pressed = right_only(ControllerInput::idle().with_button(ButtonId::Squeeze, true));
        rig.poll(&pressed);

        let events = rig.poll(&FrameInput::empty());
        assert_eq!(
            events,
            vec![ControlEvent::Disconnected { hand: Hand::Right }]
        );
        assert!(rig.controller(Hand::Right).is_none());

        // Reconnect with the button still held: diffed against the released
        // baseline, so the press edge fires again.
        let events = rig.poll(&pressed);
        assert_eq!(
            events,
            vec![
                ControlEvent::Connected { hand: Hand::Right },
                ControlEvent::Button {
                    hand: Hand::Right,
                    button: ButtonId::Squeeze,
                    pressed: true,
                },
            ]
        );
    }

    #[test]
    fn multiple_edges_in_one_frame_follow_button_order() {
        let mut rig = InputRig::new();
        rig.poll(&right_only(ControllerInput::idle()));

        let combo = right_only(
            ControllerInput::idle()
                .with_button(ButtonId::Secondary, true)
                .with_button(ButtonId::Trigger, true)
                .with_thumbstick(1.0, 0.0),
        );
        let events = rig.poll(&combo);
        assert_eq!(
            events,
            vec![
                ControlEvent::Button {
                    hand: Hand::Right,
                    button: ButtonId::Trigger,
                    pressed: true,
                },
                ControlEvent::Button {
                    hand: Hand::Right,
                    button: ButtonId::Secondary,
                    pressed: true,
                },
                ControlEvent::Axis {
                    hand: Hand::Right,
                    x: 1.0,
                    y: 0.0,
                },
            ]
        );
    }
}
