use crate::scene::{AudioSink, GrabProvider, NodeId, SceneWorld};

use super::{SlideCore, TickContext};

/// Free the held magazine: unparent, drop the joint, restore the collider
/// and grab capability, and stamp the eject debounce. Returns the freed
/// node so callers can chain further behavior (hand-off, eject impulse).
/// Idempotent: `None` when nothing is held.
pub(super) fn detach(core: &mut SlideCore, ctx: &mut TickContext) -> Option<NodeId> {
    let held = core.held.take()?;
    let mag = held.node;

    let at = ctx.world.world_position(core.slide);
    ctx.world
        .play_at(&core.config.detach_cue.cue, at, core.config.detach_cue.volume);

    ctx.world.set_parent(mag, None);

    if let Some(joint) = core.joint.take() {
        ctx.world.clear_joint_body(joint);
        ctx.world.destroy_joint(joint);
    }

    if let Some(collider) = held.collider {
        ctx.world.set_collider_enabled(collider, true);
    }

    ctx.world.set_grab_enabled(mag, true);

    core.snapped = false;
    core.in_place = false;
    core.last_eject_time = ctx.now;
    core.last_distance = 0.0;

    Some(mag)
}
