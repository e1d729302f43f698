//! The AR view a screen draws into.
//!
//! A [`Context`] bundles one tracking session with one scene graph, the view
//! options a screen may toggle in `on_init`, and the anchor handler the screen
//! registered. When the session reports an anchor, the context creates a node
//! for it under the scene root and hands that node to the handler.

use bitflags::bitflags;

use crate::{
    data_structures::scene_graph::{ContainerNode, Scene, SceneNode},
    render::Frame,
    tracking::{Anchor, AnchorEvent, TrackingEngine, TrackingSession, anchor_node_name},
};

bitflags! {
    /// Visual aids drawn on top of the scene.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DebugOptions: u8 {
        const SHOW_WORLD_ORIGIN = 0b0000_0001;
        const SHOW_FEATURE_POINTS = 0b0000_0010;
    }
}

/// Receives a freshly created anchor node, once per added anchor.
///
/// The node is already attached to the scene root and carries the anchor's
/// pose, so anything added to it follows the tracked anchor.
pub trait AnchorHandler {
    fn on_anchor_added(&mut self, node: &mut dyn SceneNode, anchor: &Anchor);
}

impl<F> AnchorHandler for F
where
    F: FnMut(&mut dyn SceneNode, &Anchor),
{
    fn on_anchor_added(&mut self, node: &mut dyn SceneNode, anchor: &Anchor) {
        self(node, anchor)
    }
}

pub struct Context {
    pub session: TrackingSession,
    pub scene: Scene,
    pub debug_options: DebugOptions,
    pub autoenables_default_lighting: bool,
    anchor_handler: Option<Box<dyn AnchorHandler>>,
}

impl Context {
    pub fn new(engine: Box<dyn TrackingEngine>) -> Self {
        Self {
            session: TrackingSession::new(engine),
            scene: Scene::new(),
            debug_options: DebugOptions::empty(),
            autoenables_default_lighting: false,
            anchor_handler: None,
        }
    }

    /// Replaces any previously registered handler.
    pub fn set_anchor_handler(&mut self, handler: Box<dyn AnchorHandler>) {
        self.anchor_handler = Some(handler);
    }

    pub fn has_anchor_handler(&self) -> bool {
        self.anchor_handler.is_some()
    }

    /// Drains the session and applies every anchor event in order. Returns the
    /// number of events applied.
    pub fn process_tracking_events(&mut self) -> usize {
        let events = self.session.poll_events();
        let count = events.len();
        for event in events {
            self.apply(event);
        }
        count
    }

    pub fn apply(&mut self, event: AnchorEvent) {
        match event {
            AnchorEvent::Added(anchor) => self.anchor_added(&anchor),
            AnchorEvent::Updated(anchor) => self.anchor_updated(&anchor),
            AnchorEvent::Removed(id) => {
                // repeated additions leave one node per delivery
                let removed = self.scene.remove_all_top_level(&anchor_node_name(id));
                if removed == 0 {
                    log::warn!("Removal of unknown anchor {}", id);
                } else {
                    log::debug!("Anchor {} removed ({} node(s))", id, removed);
                }
            }
        }
    }

    fn anchor_added(&mut self, anchor: &Anchor) {
        log::debug!("Anchor {} added", anchor.id());
        let node = ContainerNode::with_transform(&anchor.node_name(), anchor.transform().clone());
        let root = self.scene.root_node_mut();
        root.add_child(Box::new(node));
        let Some(handler) = self.anchor_handler.as_mut() else {
            return;
        };
        if let Some(node) = root.get_children_mut().last_mut() {
            handler.on_anchor_added(node.as_mut(), anchor);
        }
    }

    /// Only the anchor node's pose follows updates. Handlers are not called,
    /// so whatever they attached keeps its original size.
    fn anchor_updated(&mut self, anchor: &Anchor) {
        let name = anchor.node_name();
        let mut updated = 0;
        for node in self.scene.top_level_mut(&name) {
            node.set_local_transform(anchor.transform().clone());
            updated += 1;
        }
        if updated == 0 {
            log::warn!("Update for unknown anchor {}", anchor.id());
        }
    }

    /// Refreshes world transforms and flattens the scene for a renderer.
    pub fn frame(&mut self) -> Frame<'_> {
        self.scene.update_world_transforms();
        let feature_points = self.session.feature_points();
        Frame::compose(
            self.scene.get_render(),
            self.debug_options,
            feature_points,
            self.autoenables_default_lighting,
        )
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("session", &self.session)
            .field("scene", &self.scene)
            .field("debug_options", &self.debug_options)
            .field("autoenables_default_lighting", &self.autoenables_default_lighting)
            .field("has_anchor_handler", &self.anchor_handler.is_some())
            .finish()
    }
}
