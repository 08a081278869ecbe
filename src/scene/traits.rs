use glam::{Quat, Vec3};

use crate::domain::HandSide;

use super::{ColliderId, HandId, JointId, NodeId};

/// Transform and physics surface of the host scene.
///
/// `set_parent` must preserve the node's world transform: the local
/// transform is recomputed against the new parent. Re-parenting to the
/// current parent is a no-op.
pub trait SceneWorld {
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>);

    fn local_position(&self, node: NodeId) -> Vec3;
    fn set_local_position(&mut self, node: NodeId, position: Vec3);
    fn local_rotation(&self, node: NodeId) -> Quat;
    fn set_local_rotation(&mut self, node: NodeId, rotation: Quat);

    fn world_position(&self, node: NodeId) -> Vec3;
    fn world_rotation(&self, node: NodeId) -> Quat;
    fn distance_between(&self, a: NodeId, b: NodeId) -> f32;

    fn node_name(&self, node: NodeId) -> &str;

    fn collider_of(&self, node: NodeId) -> Option<ColliderId>;
    fn set_collider_enabled(&mut self, collider: ColliderId, enabled: bool);

    fn has_rigid_body(&self, node: NodeId) -> bool;
    /// Instantaneous velocity-change impulse on the node's rigid body.
    fn apply_velocity_change(&mut self, node: NodeId, delta: Vec3);

    /// Fixed joint between `node` and `connected`, oriented along `axis`.
    fn create_fixed_joint(&mut self, node: NodeId, connected: NodeId, axis: Vec3) -> JointId;
    fn clear_joint_body(&mut self, joint: JointId);
    fn destroy_joint(&mut self, joint: JointId);
}

/// Grab capability surface of the host's interaction system.
pub trait GrabProvider {
    /// Whether the node exposes grab capability at all (capture eligibility).
    fn is_grabbable(&self, node: NodeId) -> bool;
    /// Whether a hand currently holds the node.
    fn is_held(&self, node: NodeId) -> bool;
    fn holder(&self, node: NodeId) -> Option<HandId>;
    /// Absolute simulation time of the node's last grab; `-inf` if never.
    fn last_grab_time(&self, node: NodeId) -> f64;

    fn set_grab_enabled(&mut self, node: NodeId, enabled: bool);
    fn force_drop(&mut self, node: NodeId);
    fn force_grab(&mut self, hand: HandId, node: NodeId);
}

/// Reports which hand, if any, is positioned to pull the held object out.
pub trait GrabZone {
    /// Nearest hand inside the zone with an open grab capability.
    /// Hosts without a zone always answer `None`.
    fn nearest_open_hand(&self) -> Option<(HandId, HandSide)>;
}

/// Fire-and-forget spatial audio.
pub trait AudioSink {
    fn play_at(&mut self, cue: &str, position: Vec3, volume: f32);
}

/// Union of the collaborator contracts the slide core consumes per tick.
pub trait InteractionWorld: SceneWorld + GrabProvider + GrabZone + AudioSink {}

impl<T: SceneWorld + GrabProvider + GrabZone + AudioSink> InteractionWorld for T {}
