use std::collections::{HashMap, HashSet};
use std::time::Duration;

use trove_gesture::{PointerEvent, PointerId, PointerPhase, Vec2};

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current input state for a single window.
///
/// Holds "is down" information and the cursor position. Per-frame transitions
/// are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Mouse cursor position in logical pixels.
    pub cursor_pos: Option<Vec2>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Live contacts (mouse button or touch) and their last position.
    contacts: HashMap<PointerId, PointerEvent>,

    /// Timestamp of the most recent pointer or wheel event.
    last_time: Duration,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    ///
    /// Losing focus releases held keys and emits a `Cancel` for every live
    /// contact so no gesture stays stuck mid-press.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                frame.push_event(ev);
                if !self.focused {
                    self.keys_down.clear();
                    self.cancel_contacts(frame);
                }
                return;
            }

            // A held button keeps its anchor so the release still has a position.
            InputEvent::PointerLeft => {
                if !self.mouse_down() {
                    self.cursor_pos = None;
                }
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) && !*repeat {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::Pointer(p) => {
                self.last_time = self.last_time.max(p.time);
                if p.id == PointerId::MOUSE {
                    self.cursor_pos = Some(p.pos);
                }
                match p.phase {
                    PointerPhase::Down => {
                        self.contacts.insert(p.id, *p);
                    }
                    PointerPhase::Move => {
                        if let Some(c) = self.contacts.get_mut(&p.id) {
                            c.pos = p.pos;
                            c.time = p.time;
                        }
                    }
                    PointerPhase::Up | PointerPhase::Cancel => {
                        self.contacts.remove(&p.id);
                    }
                }
            }

            InputEvent::Wheel(w) => {
                self.last_time = self.last_time.max(w.time);
            }
        }

        frame.push_event(ev);
    }

    fn cancel_contacts(&mut self, frame: &mut InputFrame) {
        let time = self.last_time;
        let mut ids: Vec<PointerId> = self.contacts.keys().copied().collect();
        ids.sort();
        for id in ids {
            if let Some(mut c) = self.contacts.remove(&id) {
                log::debug!("focus lost: cancelling contact {:?}", c.id);
                c.phase = PointerPhase::Cancel;
                c.time = time;
                frame.push_event(InputEvent::Pointer(c));
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether the mouse button that drives gestures is held.
    pub fn mouse_down(&self) -> bool {
        self.contacts.contains_key(&PointerId::MOUSE)
    }

    /// Last known position of the mouse: the cursor, or the held contact.
    pub fn mouse_anchor(&self) -> Option<Vec2> {
        self.cursor_pos
            .or_else(|| self.contacts.get(&PointerId::MOUSE).map(|c| c.pos))
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }
}
