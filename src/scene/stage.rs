//! StageScene - reference implementation of the collaborator contracts.
//!
//! The host mirrors the handful of scene nodes the slide cares about into
//! this arena each frame and reads the event log back out. Transform state
//! here is authoritative for the state machine only; the real scene graph
//! stays on the host side.

use glam::{Quat, Vec3};

use crate::domain::HandSide;

use super::events::SceneEvent;
use super::traits::{AudioSink, GrabProvider, GrabZone, SceneWorld};
use super::{ColliderId, HandId, JointId, NodeId};

/// Parent-chain walks give up past this depth (cycle guard).
const MAX_PARENT_DEPTH: usize = 64;

const DEFAULT_ZONE_RANGE: f32 = 0.25;

struct Node {
    name: String,
    parent: Option<NodeId>,
    local_position: Vec3,
    local_rotation: Quat,
    grabbable: bool,
    grab_enabled: bool,
    rigid_body: bool,
    collider: Option<ColliderId>,
    last_grab_time: f64,
}

struct Collider {
    enabled: bool,
}

struct Joint {
    node: NodeId,
    connected: Option<NodeId>,
    axis: Vec3,
    alive: bool,
}

struct Hand {
    node: NodeId,
    side: HandSide,
    holding: Option<NodeId>,
}

/// Minimal scene mirror implementing all four collaborator contracts.
pub struct StageScene {
    nodes: Vec<Node>,
    colliders: Vec<Collider>,
    joints: Vec<Joint>,
    hands: Vec<Hand>,
    zone_anchor: Option<NodeId>,
    zone_range: f32,
    time: f64,
    events: Vec<SceneEvent>,
}

impl StageScene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            colliders: Vec::new(),
            joints: Vec::new(),
            hands: Vec::new(),
            zone_anchor: None,
            zone_range: DEFAULT_ZONE_RANGE,
            time: 0.0,
            events: Vec::new(),
        }
    }

    pub fn spawn_node(
        &mut self,
        name: &str,
        grabbable: bool,
        rigid_body: bool,
        with_collider: bool,
    ) -> NodeId {
        let collider = if with_collider {
            let id = ColliderId(self.colliders.len() as u32);
            self.colliders.push(Collider { enabled: true });
            Some(id)
        } else {
            None
        };

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_string(),
            parent: None,
            local_position: Vec3::ZERO,
            local_rotation: Quat::IDENTITY,
            grabbable,
            grab_enabled: grabbable,
            rigid_body,
            collider,
            last_grab_time: f64::NEG_INFINITY,
        });
        id
    }

    pub fn add_hand(&mut self, side: HandSide) -> HandId {
        let name = match side {
            HandSide::Left => "LeftHand",
            HandSide::Right => "RightHand",
        };
        let node = self.spawn_node(name, false, false, false);
        let id = HandId(self.hands.len() as u32);
        self.hands.push(Hand {
            node,
            side,
            holding: None,
        });
        id
    }

    /// Anchor the grab zone at `anchor` (normally the slide node).
    pub fn set_zone(&mut self, anchor: NodeId, range: f32) {
        self.zone_anchor = Some(anchor);
        self.zone_range = range;
    }

    pub fn set_zone_range(&mut self, range: f32) {
        self.zone_range = range;
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Move a node in world space; its local transform is recomputed
    /// against the current parent.
    pub fn set_world_position(&mut self, node: NodeId, position: Vec3) {
        let Some(parent) = self.node(node).map(|n| n.parent) else {
            return;
        };
        let local = match parent {
            Some(p) => {
                let (parent_pos, parent_rot) = self.world_transform(p);
                parent_rot.inverse() * (position - parent_pos)
            }
            None => position,
        };
        self.nodes[node.index()].local_position = local;
    }

    pub fn set_world_rotation(&mut self, node: NodeId, rotation: Quat) {
        let Some(parent) = self.node(node).map(|n| n.parent) else {
            return;
        };
        let local = match parent {
            Some(p) => {
                let (_, parent_rot) = self.world_transform(p);
                parent_rot.inverse() * rotation
            }
            None => rotation,
        };
        self.nodes[node.index()].local_rotation = local;
    }

    pub fn set_hand_world_position(&mut self, hand: HandId, position: Vec3) {
        let Some(node) = self.hands.get(hand.index()).map(|h| h.node) else {
            return;
        };
        self.set_world_position(node, position);
    }

    /// Host reports a hand picked the node up (stamps the grab time).
    pub fn notify_grabbed(&mut self, node: NodeId, hand: HandId) {
        if self.node(node).is_none() {
            return;
        }
        let Some(h) = self.hands.get_mut(hand.index()) else {
            return;
        };
        h.holding = Some(node);
        self.nodes[node.index()].last_grab_time = self.time;
    }

    /// Host reports the node left whichever hand held it.
    pub fn notify_released(&mut self, node: NodeId) {
        for hand in self.hands.iter_mut() {
            if hand.holding == Some(node) {
                hand.holding = None;
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn holding(&self, hand: HandId) -> Option<NodeId> {
        self.hands.get(hand.index()).and_then(|h| h.holding)
    }

    pub fn grab_enabled(&self, node: NodeId) -> bool {
        self.node(node).map(|n| n.grab_enabled).unwrap_or(false)
    }

    pub fn collider_enabled(&self, collider: ColliderId) -> bool {
        self.colliders
            .get(collider.index())
            .map(|c| c.enabled)
            .unwrap_or(false)
    }

    pub fn joint_alive(&self, joint: JointId) -> bool {
        self.joints.get(joint.index()).map(|j| j.alive).unwrap_or(false)
    }

    /// The jointed node and its currently connected body, if any.
    pub fn joint_bodies(&self, joint: JointId) -> Option<(NodeId, Option<NodeId>)> {
        self.joints.get(joint.index()).map(|j| (j.node, j.connected))
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn world_transform(&self, node: NodeId) -> (Vec3, Quat) {
        let Some(n) = self.node(node) else {
            return (Vec3::ZERO, Quat::IDENTITY);
        };
        let mut position = n.local_position;
        let mut rotation = n.local_rotation;
        let mut current = n.parent;
        let mut depth = 0;
        while let Some(p) = current {
            if depth >= MAX_PARENT_DEPTH {
                break;
            }
            let Some(pn) = self.node(p) else {
                break;
            };
            position = pn.local_position + pn.local_rotation * position;
            rotation = pn.local_rotation * rotation;
            current = pn.parent;
            depth += 1;
        }
        (position, rotation)
    }
}

impl Default for StageScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneWorld for StageScene {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        let Some(current) = self.node(node).map(|n| n.parent) else {
            return;
        };
        if current == parent || parent == Some(node) {
            return;
        }
        if let Some(p) = parent {
            if self.node(p).is_none() {
                return;
            }
        }

        let (world_pos, world_rot) = self.world_transform(node);
        let (local_pos, local_rot) = match parent {
            Some(p) => {
                let (parent_pos, parent_rot) = self.world_transform(p);
                let inverse = parent_rot.inverse();
                (inverse * (world_pos - parent_pos), inverse * world_rot)
            }
            None => (world_pos, world_rot),
        };

        let n = &mut self.nodes[node.index()];
        n.parent = parent;
        n.local_position = local_pos;
        n.local_rotation = local_rot;
    }

    fn local_position(&self, node: NodeId) -> Vec3 {
        self.node(node).map(|n| n.local_position).unwrap_or(Vec3::ZERO)
    }

    fn set_local_position(&mut self, node: NodeId, position: Vec3) {
        if let Some(n) = self.node_mut(node) {
            n.local_position = position;
        }
    }

    fn local_rotation(&self, node: NodeId) -> Quat {
        self.node(node).map(|n| n.local_rotation).unwrap_or(Quat::IDENTITY)
    }

    fn set_local_rotation(&mut self, node: NodeId, rotation: Quat) {
        if let Some(n) = self.node_mut(node) {
            n.local_rotation = rotation;
        }
    }

    fn world_position(&self, node: NodeId) -> Vec3 {
        self.world_transform(node).0
    }

    fn world_rotation(&self, node: NodeId) -> Quat {
        self.world_transform(node).1
    }

    fn distance_between(&self, a: NodeId, b: NodeId) -> f32 {
        self.world_position(a).distance(self.world_position(b))
    }

    fn node_name(&self, node: NodeId) -> &str {
        self.node(node).map(|n| n.name.as_str()).unwrap_or("")
    }

    fn collider_of(&self, node: NodeId) -> Option<ColliderId> {
        self.node(node).and_then(|n| n.collider)
    }

    fn set_collider_enabled(&mut self, collider: ColliderId, enabled: bool) {
        if let Some(c) = self.colliders.get_mut(collider.index()) {
            c.enabled = enabled;
        }
    }

    fn has_rigid_body(&self, node: NodeId) -> bool {
        self.node(node).map(|n| n.rigid_body).unwrap_or(false)
    }

    fn apply_velocity_change(&mut self, node: NodeId, delta: Vec3) {
        if !self.has_rigid_body(node) {
            return;
        }
        self.events.push(SceneEvent::Impulse {
            node: node.0,
            velocity_change: delta.to_array(),
        });
    }

    fn create_fixed_joint(&mut self, node: NodeId, connected: NodeId, axis: Vec3) -> JointId {
        let id = JointId(self.joints.len() as u32);
        self.joints.push(Joint {
            node,
            connected: Some(connected),
            axis,
            alive: true,
        });
        self.events.push(SceneEvent::JointCreated {
            joint: id.0,
            node: node.0,
            connected: connected.0,
            axis: axis.to_array(),
        });
        id
    }

    fn clear_joint_body(&mut self, joint: JointId) {
        if let Some(j) = self.joints.get_mut(joint.index()) {
            j.connected = None;
        }
    }

    fn destroy_joint(&mut self, joint: JointId) {
        let Some(j) = self.joints.get_mut(joint.index()) else {
            return;
        };
        if !j.alive {
            return;
        }
        j.alive = false;
        self.events.push(SceneEvent::JointRemoved { joint: joint.0 });
    }
}

impl GrabProvider for StageScene {
    fn is_grabbable(&self, node: NodeId) -> bool {
        self.node(node).map(|n| n.grabbable).unwrap_or(false)
    }

    fn is_held(&self, node: NodeId) -> bool {
        self.hands.iter().any(|h| h.holding == Some(node))
    }

    fn holder(&self, node: NodeId) -> Option<HandId> {
        self.hands
            .iter()
            .position(|h| h.holding == Some(node))
            .map(|i| HandId(i as u32))
    }

    fn last_grab_time(&self, node: NodeId) -> f64 {
        self.node(node)
            .map(|n| n.last_grab_time)
            .unwrap_or(f64::NEG_INFINITY)
    }

    fn set_grab_enabled(&mut self, node: NodeId, enabled: bool) {
        if let Some(n) = self.node_mut(node) {
            if n.grabbable {
                n.grab_enabled = enabled;
            }
        }
    }

    fn force_drop(&mut self, node: NodeId) {
        let mut dropped = false;
        for hand in self.hands.iter_mut() {
            if hand.holding == Some(node) {
                hand.holding = None;
                dropped = true;
            }
        }
        if dropped {
            self.events.push(SceneEvent::DropForced { node: node.0 });
        }
    }

    fn force_grab(&mut self, hand: HandId, node: NodeId) {
        if self.node(node).is_none() {
            return;
        }
        let Some(h) = self.hands.get_mut(hand.index()) else {
            return;
        };
        h.holding = Some(node);
        self.nodes[node.index()].last_grab_time = self.time;
        self.events.push(SceneEvent::GrabForced {
            hand: hand.0,
            node: node.0,
        });
    }
}

impl GrabZone for StageScene {
    fn nearest_open_hand(&self) -> Option<(HandId, HandSide)> {
        let anchor = self.zone_anchor?;
        let anchor_pos = self.world_position(anchor);

        let mut best: Option<(f32, HandId, HandSide)> = None;
        for (i, hand) in self.hands.iter().enumerate() {
            if hand.holding.is_some() {
                continue;
            }
            let distance = self.world_position(hand.node).distance(anchor_pos);
            if distance > self.zone_range {
                continue;
            }
            if best.map_or(true, |(d, _, _)| distance < d) {
                best = Some((distance, HandId(i as u32), hand.side));
            }
        }
        best.map(|(_, hand, side)| (hand, side))
    }
}

impl AudioSink for StageScene {
    fn play_at(&mut self, cue: &str, position: Vec3, volume: f32) {
        self.events.push(SceneEvent::Sound {
            cue: cue.to_string(),
            position: position.to_array(),
            volume,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reparent_preserves_world_position() {
        let mut stage = StageScene::new();
        let root = stage.spawn_node("Root", false, false, false);
        let child = stage.spawn_node("Child", false, false, false);

        stage.set_world_position(root, Vec3::new(1.0, 2.0, 3.0));
        stage.set_world_position(child, Vec3::new(4.0, 0.0, 0.0));

        stage.set_parent(child, Some(root));
        assert_eq!(stage.local_position(child), Vec3::new(3.0, -2.0, -3.0));
        assert_eq!(stage.world_position(child), Vec3::new(4.0, 0.0, 0.0));

        stage.set_parent(child, None);
        assert_eq!(stage.world_position(child), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn reparent_to_same_parent_is_a_noop() {
        let mut stage = StageScene::new();
        let root = stage.spawn_node("Root", false, false, false);
        let child = stage.spawn_node("Child", false, false, false);

        stage.set_parent(child, Some(root));
        stage.set_local_position(child, Vec3::new(0.0, -0.05, 0.0));
        stage.set_parent(child, Some(root));
        assert_eq!(stage.local_position(child), Vec3::new(0.0, -0.05, 0.0));
    }

    #[test]
    fn zone_picks_nearest_open_hand() {
        let mut stage = StageScene::new();
        let slide = stage.spawn_node("MagazineSlide", false, false, false);
        stage.set_zone(slide, 0.25);

        let left = stage.add_hand(HandSide::Left);
        let right = stage.add_hand(HandSide::Right);
        stage.set_hand_world_position(left, Vec3::new(0.2, 0.0, 0.0));
        stage.set_hand_world_position(right, Vec3::new(0.1, 0.0, 0.0));

        let (hand, side) = stage.nearest_open_hand().expect("a hand is in range");
        assert_eq!(hand, right);
        assert_eq!(side, HandSide::Right);

        // An occupied hand no longer counts as open.
        let rock = stage.spawn_node("Rock", true, false, false);
        stage.notify_grabbed(rock, right);
        let (hand, side) = stage.nearest_open_hand().expect("left is still open");
        assert_eq!(hand, left);
        assert_eq!(side, HandSide::Left);
    }

    #[test]
    fn hands_out_of_range_are_ignored() {
        let mut stage = StageScene::new();
        let slide = stage.spawn_node("MagazineSlide", false, false, false);
        stage.set_zone(slide, 0.25);

        let left = stage.add_hand(HandSide::Left);
        stage.set_hand_world_position(left, Vec3::new(1.0, 0.0, 0.0));
        assert!(stage.nearest_open_hand().is_none());
    }
}
