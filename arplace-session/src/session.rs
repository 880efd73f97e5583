//! In-memory world tracking session
//!
//! The session owns the scene graph, the detected planes and the anchors.
//! Placement anchors are queued when added and turned into scene nodes on the
//! next [`Session::update`], the way a tracker confirms anchors a frame later.
//! Lifecycle changes and new nodes are queued as [`SessionEvent`]s for the
//! host to deliver to its observer.

use std::collections::{HashMap, VecDeque};

use arplace_core::{
    Anchor, AnchorId, AnchorResolver, CategoryMask, Error, NodeHit, NodeId, NodeTransform,
    PlaneHit, Point3f, Result, SceneGraph, SceneSubtree, ScreenPoint, SessionObserver,
    TrackingFault, TrackingScene, WorldPose,
};
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::config::SessionConfiguration;
use crate::plane::{DetectedPlane, PlaneAlignment};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    Interrupted,
    Failed,
}

/// Something the host should tell its session observer about
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    NodeAdded { node: NodeId, anchor: Anchor },
    Failed(TrackingFault),
    Interrupted,
    InterruptionEnded,
}

impl SessionEvent {
    /// Call the matching observer hook
    pub fn deliver(&self, observer: &mut dyn SessionObserver) {
        match self {
            Self::NodeAdded { node, anchor } => observer.did_add_node(*node, anchor),
            Self::Failed(fault) => observer.session_did_fail(fault),
            Self::Interrupted => observer.session_was_interrupted(),
            Self::InterruptionEnded => observer.session_interruption_ended(),
        }
    }
}

/// Counters reported after each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStatistics {
    pub frame: u64,
    pub nodes: usize,
    pub anchors: usize,
    pub planes: usize,
    pub pending_anchors: usize,
}

/// A deterministic world tracking session
pub struct Session<R> {
    config: SessionConfiguration,
    state: SessionState,
    camera: Camera,
    scene: SceneGraph,
    planes: Vec<DetectedPlane>,
    anchors: Vec<Anchor>,
    anchor_nodes: HashMap<AnchorId, NodeId>,
    pending: VecDeque<Anchor>,
    events: VecDeque<SessionEvent>,
    resolver: R,
    next_anchor: u64,
    frame: u64,
}

impl<R: AnchorResolver> Session<R> {
    /// Create a session that has not started tracking yet
    pub fn new(resolver: R, camera: Camera) -> Self {
        Self {
            config: SessionConfiguration::default(),
            state: SessionState::NotStarted,
            camera,
            scene: SceneGraph::new(),
            planes: Vec::new(),
            anchors: Vec::new(),
            anchor_nodes: HashMap::new(),
            pending: VecDeque::new(),
            events: VecDeque::new(),
            resolver,
            next_anchor: 1,
            frame: 0,
        }
    }

    pub fn configuration(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Anchors that have a node in the scene
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn planes(&self) -> &[DetectedPlane] {
        &self.planes
    }

    /// Scene node created for an anchor
    pub fn anchor_node(&self, anchor: AnchorId) -> Option<NodeId> {
        self.anchor_nodes.get(&anchor).copied()
    }

    /// Start or resume tracking with `config`
    pub fn run(&mut self, config: SessionConfiguration) {
        info!(
            plane_detection = ?config.plane_detection,
            previous = ?self.state,
            "session running"
        );
        self.config = config;
        self.state = SessionState::Running;
    }

    /// Stop tracking until the next [`Session::run`]
    pub fn pause(&mut self) {
        if self.state == SessionState::Running {
            info!("session paused");
            self.state = SessionState::Paused;
        }
    }

    /// Suspend tracking, e.g. when the camera becomes unavailable
    pub fn interrupt(&mut self) {
        if self.state == SessionState::Running {
            self.state = SessionState::Interrupted;
            self.events.push_back(SessionEvent::Interrupted);
        }
    }

    /// Resume after [`Session::interrupt`]
    pub fn end_interruption(&mut self) {
        if self.state == SessionState::Interrupted {
            self.state = SessionState::Running;
            self.events.push_back(SessionEvent::InterruptionEnded);
        }
    }

    /// Stop the session with a fault; it stays failed until run again
    pub fn fail(&mut self, fault: TrackingFault) {
        warn!(%fault, "session failed");
        self.state = SessionState::Failed;
        self.events.push_back(SessionEvent::Failed(fault));
    }

    /// Report a detected plane.
    ///
    /// Returns `Ok(None)` when the configuration does not detect planes with
    /// this alignment.
    pub fn detect_plane(
        &mut self,
        center: Point3f,
        width: f32,
        length: f32,
        alignment: PlaneAlignment,
    ) -> Result<Option<AnchorId>> {
        if !self.is_running() {
            return Err(Error::SessionNotRunning);
        }
        if !self.config.plane_detection.accepts(alignment) {
            debug!(?alignment, "plane ignored by configuration");
            return Ok(None);
        }

        let id = self.next_anchor_id();
        let plane = DetectedPlane {
            anchor: id,
            center,
            width,
            length,
            alignment,
        };
        let anchor = Anchor::plane(id, plane.pose(), width, length);
        let node = self.attach_anchor_node(&anchor, plane.visualization())?;

        self.planes.push(plane);
        self.events.push_back(SessionEvent::NodeAdded { node, anchor });
        Ok(Some(id))
    }

    /// Advance one frame: resolve queued anchors while running
    pub fn update(&mut self) -> Result<FrameStatistics> {
        if self.is_running() {
            while let Some(anchor) = self.pending.pop_front() {
                let content = self.resolver.resolve_anchor(&anchor);
                let node = self.attach_anchor_node(&anchor, content)?;
                self.events.push_back(SessionEvent::NodeAdded { node, anchor });
            }
        }

        self.frame += 1;
        let stats = self.statistics();
        if self.config.shows_statistics {
            debug!(
                frame = stats.frame,
                nodes = stats.nodes,
                anchors = stats.anchors,
                planes = stats.planes,
                pending = stats.pending_anchors,
                "frame statistics"
            );
        }
        Ok(stats)
    }

    pub fn statistics(&self) -> FrameStatistics {
        FrameStatistics {
            frame: self.frame,
            nodes: self.scene.len(),
            anchors: self.anchors.len(),
            planes: self.planes.len(),
            pending_anchors: self.pending.len(),
        }
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    fn next_anchor_id(&mut self) -> AnchorId {
        let id = AnchorId(self.next_anchor);
        self.next_anchor += 1;
        id
    }

    /// The content root becomes the anchor node: it is placed at the anchor
    /// pose directly under the scene root, so its local frame is the world
    /// frame.
    fn attach_anchor_node(&mut self, anchor: &Anchor, mut content: SceneSubtree) -> Result<NodeId> {
        let placed = anchor
            .pose
            .compose(WorldPose::from(content.transform.to_matrix()));
        content.transform = NodeTransform::from_pose(&placed).unwrap_or_else(|| {
            warn!(anchor = %anchor.id, "degenerate anchor pose, using identity");
            NodeTransform::identity()
        });

        let root = self.scene.root();
        let node = self.scene.attach_subtree(root, &content)?;

        self.anchors.push(anchor.clone());
        self.anchor_nodes.insert(anchor.id, node);
        Ok(node)
    }
}

impl<R: AnchorResolver> TrackingScene for Session<R> {
    fn hit_test_planes(&self, point: ScreenPoint) -> Option<PlaneHit> {
        let ray = self.camera.ray_through(point)?;
        self.planes
            .iter()
            .filter_map(|plane| plane.intersect_ray(&ray).map(|t| (plane, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(plane, t)| PlaneHit {
                plane: plane.anchor,
                world_pose: WorldPose::from_translation(ray.point_at(t).coords),
                distance: t,
            })
    }

    fn hit_test_nodes(&self, point: ScreenPoint, mask: CategoryMask) -> Option<NodeHit> {
        let ray = self.camera.ray_through(point)?;
        self.scene
            .ids()
            .filter_map(|id| {
                let node = self.scene.node(id)?;
                if !node.category.intersects(mask) {
                    return None;
                }
                let bounds = node.bounds?;
                let to_local = self.scene.world_matrix(id)?.try_inverse()?;
                let t = bounds.intersect_ray(&ray.transformed(&to_local))?;
                Some(NodeHit {
                    node: id,
                    world_point: ray.point_at(t),
                    distance: t,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn add_anchor(&mut self, name: &str, pose: WorldPose) -> Result<AnchorId> {
        if !self.is_running() {
            return Err(Error::SessionNotRunning);
        }
        let id = self.next_anchor_id();
        debug!(anchor = %id, name, "anchor queued");
        self.pending.push_back(Anchor::placement(id, name, pose));
        Ok(id)
    }

    fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }
}
