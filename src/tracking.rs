//! AR tracking session and anchor events.
//!
//! Pose estimation and plane fitting belong to the platform's tracking engine.
//! This module only models the seam: a [`TrackingEngine`] is started with a
//! [`TrackingConfiguration`] and reports [`AnchorEvent`]s, which the
//! [`crate::context::Context`] turns into anchor nodes and handler calls.
//!
//! [`ScriptedEngine`] replays a fixed list of anchors and stands in for a real
//! engine in tests and the demo binary.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::data_structures::instance::Instance;

pub type AnchorId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingMode {
    /// Six degrees of freedom from camera and motion sensors.
    #[default]
    World,
}

bitflags! {
    /// Which plane orientations the engine should report.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PlaneDetection: u8 {
        const HORIZONTAL = 0b0000_0001;
        const VERTICAL = 0b0000_0010;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackingConfiguration {
    pub mode: TrackingMode,
    pub plane_detection: PlaneDetection,
}

impl TrackingConfiguration {
    /// World tracking without plane detection.
    pub fn world_tracking() -> Self {
        Self::default()
    }

    pub fn with_plane_detection(mut self, plane_detection: PlaneDetection) -> Self {
        self.plane_detection = plane_detection;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneAlignment {
    Horizontal,
    Vertical,
}

impl PlaneAlignment {
    fn detection_flag(self) -> PlaneDetection {
        match self {
            PlaneAlignment::Horizontal => PlaneDetection::HORIZONTAL,
            PlaneAlignment::Vertical => PlaneDetection::VERTICAL,
        }
    }
}

/// Measured size of a detected plane, in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneExtent {
    pub width: f32,
    pub height: f32,
}

/// A detected real-world plane. `center` is relative to the anchor's own pose.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    pub alignment: PlaneAlignment,
    pub transform: Instance,
    pub extent: PlaneExtent,
    pub center: cgmath::Vector3<f32>,
}

impl PlaneAnchor {
    pub fn new(
        id: AnchorId,
        alignment: PlaneAlignment,
        extent: (f32, f32),
        center: (f32, f32, f32),
    ) -> Self {
        Self {
            id,
            alignment,
            transform: Instance::default(),
            extent: PlaneExtent {
                width: extent.0,
                height: extent.1,
            },
            center: cgmath::Vector3::new(center.0, center.1, center.2),
        }
    }

    pub fn with_transform(mut self, transform: Instance) -> Self {
        self.transform = transform;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Anchor {
    Plane(PlaneAnchor),
    /// Any other tracked point, e.g. one placed by a hit test.
    Point { id: AnchorId, transform: Instance },
}

impl Anchor {
    pub fn id(&self) -> AnchorId {
        match self {
            Anchor::Plane(plane) => plane.id,
            Anchor::Point { id, .. } => *id,
        }
    }

    pub fn transform(&self) -> &Instance {
        match self {
            Anchor::Plane(plane) => &plane.transform,
            Anchor::Point { transform, .. } => transform,
        }
    }

    pub fn as_plane(&self) -> Option<&PlaneAnchor> {
        match self {
            Anchor::Plane(plane) => Some(plane),
            Anchor::Point { .. } => None,
        }
    }

    /// Name of the scene node the view creates for this anchor.
    pub fn node_name(&self) -> String {
        anchor_node_name(self.id())
    }
}

pub fn anchor_node_name(id: AnchorId) -> String {
    format!("anchor-{}", id)
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnchorEvent {
    Added(Anchor),
    Updated(Anchor),
    Removed(AnchorId),
}

/// The platform engine that estimates poses and detects anchors.
pub trait TrackingEngine {
    fn start(&mut self, configuration: &TrackingConfiguration);

    fn pause(&mut self);

    /// Anchor changes since the last call, in the order they happened.
    fn poll_events(&mut self) -> Vec<AnchorEvent>;

    /// Current feature-point cloud in world space.
    fn feature_points(&self) -> Vec<[f32; 3]> {
        Vec::new()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Paused,
}

/// Handle to a tracking run. Owned by the view it belongs to.
pub struct TrackingSession {
    engine: Box<dyn TrackingEngine>,
    configuration: Option<TrackingConfiguration>,
    state: SessionState,
}

impl TrackingSession {
    pub fn new(engine: Box<dyn TrackingEngine>) -> Self {
        Self {
            engine,
            configuration: None,
            state: SessionState::NotStarted,
        }
    }

    /// Starts, or restarts with a new configuration.
    pub fn run(&mut self, configuration: TrackingConfiguration) {
        log::info!(
            "Running {:?} tracking with plane detection {:?}",
            configuration.mode,
            configuration.plane_detection
        );
        self.engine.start(&configuration);
        self.configuration = Some(configuration);
        self.state = SessionState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == SessionState::Running {
            log::info!("Pausing tracking session");
            self.engine.pause();
            self.state = SessionState::Paused;
        }
    }

    pub fn configuration(&self) -> Option<&TrackingConfiguration> {
        self.configuration.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn poll_events(&mut self) -> Vec<AnchorEvent> {
        if self.state != SessionState::Running {
            return Vec::new();
        }
        self.engine.poll_events()
    }

    pub fn feature_points(&self) -> Vec<[f32; 3]> {
        self.engine.feature_points()
    }
}

impl std::fmt::Debug for TrackingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingSession")
            .field("configuration", &self.configuration)
            .field("state", &self.state)
            .finish()
    }
}

/// Replays queued anchor events. Plane anchors are only reported when the
/// running configuration enables their alignment.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    pending: VecDeque<AnchorEvent>,
    running: Option<TrackingConfiguration>,
    feature_points: Vec<[f32; 3]>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: impl IntoIterator<Item = AnchorEvent>) -> Self {
        Self {
            pending: events.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_feature_points(mut self, points: Vec<[f32; 3]>) -> Self {
        self.feature_points = points;
        self
    }

    pub fn push(&mut self, event: AnchorEvent) {
        self.pending.push_back(event);
    }

    fn is_reported(configuration: &TrackingConfiguration, event: &AnchorEvent) -> bool {
        match event {
            AnchorEvent::Added(Anchor::Plane(plane))
            | AnchorEvent::Updated(Anchor::Plane(plane)) => {
                configuration
                    .plane_detection
                    .contains(plane.alignment.detection_flag())
            }
            _ => true,
        }
    }
}

impl TrackingEngine for ScriptedEngine {
    fn start(&mut self, configuration: &TrackingConfiguration) {
        self.running = Some(*configuration);
    }

    fn pause(&mut self) {
        self.running = None;
    }

    fn poll_events(&mut self) -> Vec<AnchorEvent> {
        let Some(configuration) = self.running else {
            return Vec::new();
        };
        self.pending
            .drain(..)
            .filter(|event| Self::is_reported(&configuration, event))
            .collect()
    }

    fn feature_points(&self) -> Vec<[f32; 3]> {
        if self.running.is_some() {
            self.feature_points.clone()
        } else {
            Vec::new()
        }
    }
}
