use std::time::Duration;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use trove_gesture::{PointerEvent, PointerPhase, Vec2, WheelEvent};

use crate::input::{InputEvent, InputState, Key, KeyState};

/// Logical pixels per scroll line for line-based wheels.
const LINE_HEIGHT_PX: f32 = 40.0;

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `time` is the input timeline stamp for pointer and wheel events. Returns
/// `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
    time: Duration,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let pos = to_logical(window, *position);
            Some(InputEvent::Pointer(PointerEvent::mouse(PointerPhase::Move, pos.x, pos.y, time)))
        }

        // Only the primary button drives gestures.
        WindowEvent::MouseInput { state: st, button: MouseButton::Left, .. } => {
            mouse_button_event(state, *st == ElementState::Pressed, time)
        }

        WindowEvent::Touch(Touch { id, phase, location, .. }) => {
            let pos = to_logical(window, *location);
            let phase = match phase {
                TouchPhase::Started => PointerPhase::Down,
                TouchPhase::Moved => PointerPhase::Move,
                TouchPhase::Ended => PointerPhase::Up,
                TouchPhase::Cancelled => PointerPhase::Cancel,
            };
            Some(InputEvent::Pointer(PointerEvent::touch(*id, phase, pos.x, pos.y, time)))
        }

        WindowEvent::MouseWheel { delta, .. } => {
            // winit reports positive y for scrolling away from the user.
            let delta_y = match delta {
                MouseScrollDelta::LineDelta(_, y) => -*y * LINE_HEIGHT_PX,
                MouseScrollDelta::PixelDelta(p) => -to_logical(window, *p).y,
            };
            Some(InputEvent::Wheel(WheelEvent { delta_y, time }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state: st,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

/// winit 0.30 does not expose a cursor query, so button events take the
/// tracked position. A held button always has one (its contact), so a
/// release is only dropped when no press was ever seen.
fn mouse_button_event(state: &InputState, pressed: bool, time: Duration) -> Option<InputEvent> {
    let pos = state.mouse_anchor()?;
    let phase = if pressed { PointerPhase::Down } else { PointerPhase::Up };
    Some(InputEvent::Pointer(PointerEvent::mouse(phase, pos.x, pos.y, time)))
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Space => Key::Space,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyR => Key::R,
            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::input::InputFrame;

    fn mouse(phase: PointerPhase, x: f32, y: f32, t: u64) -> InputEvent {
        InputEvent::Pointer(PointerEvent::mouse(phase, x, y, Duration::from_millis(t)))
    }

    #[test]
    fn release_after_leaving_window_is_forwarded() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, mouse(PointerPhase::Move, 10.0, 10.0, 0));
        s.apply_event(&mut f, mouse(PointerPhase::Down, 10.0, 10.0, 5));
        s.apply_event(&mut f, InputEvent::PointerLeft);

        let ev = mouse_button_event(&s, false, Duration::from_millis(50));
        let Some(InputEvent::Pointer(up)) = ev else {
            panic!("release dropped: {ev:?}");
        };
        assert_eq!(up.phase, PointerPhase::Up);
        assert_eq!(up.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn press_without_cursor_is_ignored() {
        let s = InputState::default();
        assert_eq!(mouse_button_event(&s, true, Duration::ZERO), None);
        assert_eq!(mouse_button_event(&s, false, Duration::ZERO), None);
    }

    #[test]
    fn bound_keys_are_named() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyR)), Key::R);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown(_)));
    }
}
