use glam::Vec3;

use crate::scene::SceneWorld;

use super::{detach, PendingEject, SlideCore, TickContext, EJECT_CLEARANCE_Y};

/// Force-eject the held magazine: synchronous detach, immediate outward
/// impulse, then a deferred unparent at the next fixed physics step.
pub(super) fn eject(core: &mut SlideCore, ctx: &mut TickContext) {
    let Some(mag) = detach::detach(core, ctx) else {
        return;
    };
    core.last_eject_time = ctx.now;

    if ctx.world.has_rigid_body(mag) {
        // Clear the receptacle mouth before the impulse: re-enter the slide
        // frame, push the magazine out to the clearance offset unless it is
        // already past the snap band on the outward side, then free it.
        ctx.world.set_parent(mag, Some(core.slide));
        let local = ctx.world.local_position(mag);
        if local.y > -core.config.snap_distance {
            ctx.world
                .set_local_position(mag, Vec3::new(0.0, EJECT_CLEARANCE_Y, 0.0));
        }
        ctx.world.set_parent(mag, None);

        let up = ctx.world.world_rotation(mag) * Vec3::Y;
        ctx.world
            .apply_velocity_change(mag, -up * core.config.eject_force);
    }

    core.pending_eject = Some(PendingEject { node: mag });
}

/// Complete a pending ejection at the fixed-step boundary: one more parent
/// clear in case another system re-parented the magazine while the sequence
/// was suspended. The clear is idempotent, so a concurrent re-capture of
/// the same node races harmlessly.
pub(super) fn on_physics_step(core: &mut SlideCore, ctx: &mut TickContext) {
    let Some(pending) = core.pending_eject.take() else {
        return;
    };
    ctx.world.set_parent(pending.node, None);
}
