use trove_engine::backend::{Backend, Message, MessageKind};
use trove_engine::coords::Vec2;
use trove_engine::scene::{HitResult, ObjectId, Scene};
use trove_gesture::Transform;

/// The desktop viewer's side of the capability interface.
///
/// Owns the scene that gets painted each frame and the last message, which
/// the viewer shows in the window title.
#[derive(Debug)]
pub struct ViewerBackend {
    scene: Scene,
    banner: Option<Message>,
    found: Vec<ObjectId>,
}

impl ViewerBackend {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            banner: None,
            found: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn banner(&self) -> Option<&Message> {
        self.banner.as_ref()
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }
}

impl Backend for ViewerBackend {
    fn render_transform(&mut self, transform: Transform) {
        self.scene.set_transform(transform);
    }

    fn raycast(&mut self, ndc: Vec2) -> HitResult {
        self.scene.raycast(ndc)
    }

    fn show_message(&mut self, message: Message) {
        match message.kind {
            MessageKind::Info | MessageKind::Success => log::info!("{message}"),
            MessageKind::Warning | MessageKind::Error => log::warn!("{message}"),
        }
        self.banner = Some(message);
    }

    fn mark_found(&mut self, id: ObjectId) {
        if let Some(obj) = self.scene.object(id) {
            log::debug!("found '{}'", obj.name);
        }
        if self.scene.set_visible(id, false) {
            self.found.push(id);
        }
    }

    fn reset_targets(&mut self) {
        self.scene.show_all();
        self.found.clear();
    }
}
