use trove_gesture::Transform;

use crate::coords::Vec2;
use crate::scene::{HitResult, ObjectId, Scene};

use super::{Backend, Message, MessageKind};

/// Backend without a window: keeps a [`Scene`] up to date and records
/// everything it is asked to show.
#[derive(Debug)]
pub struct HeadlessBackend {
    scene: Scene,
    transforms: Vec<Transform>,
    messages: Vec<Message>,
    found: Vec<ObjectId>,
}

impl HeadlessBackend {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            transforms: Vec::new(),
            messages: Vec::new(),
            found: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Every transform rendered so far, oldest first.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn messages_of(&self, kind: MessageKind) -> impl Iterator<Item = &Message> + '_ {
        self.messages.iter().filter(move |m| m.kind == kind)
    }

    /// Targets found in the current round, in order.
    pub fn found(&self) -> &[ObjectId] {
        &self.found
    }
}

impl Backend for HeadlessBackend {
    fn render_transform(&mut self, transform: Transform) {
        self.scene.set_transform(transform);
        self.transforms.push(transform);
    }

    fn raycast(&mut self, ndc: Vec2) -> HitResult {
        self.scene.raycast(ndc)
    }

    fn show_message(&mut self, message: Message) {
        log::debug!("headless message [{:?}]: {}", message.kind, message.text);
        self.messages.push(message);
    }

    fn mark_found(&mut self, id: ObjectId) {
        if self.scene.set_visible(id, false) {
            self.found.push(id);
        } else {
            log::warn!("mark_found: unknown object {id:?}");
        }
    }

    fn reset_targets(&mut self) {
        self.scene.show_all();
        self.found.clear();
    }
}
