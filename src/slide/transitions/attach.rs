use glam::Vec3;

use crate::scene::{AudioSink, GrabProvider, SceneWorld};

use super::{SlideCore, TickContext};

/// Lock the held magazine in place. The holding hand must be released
/// before the transform is pinned and the joint created.
pub(super) fn attach(core: &mut SlideCore, ctx: &mut TickContext) {
    let Some(held) = core.held else {
        return;
    };
    if core.snapped {
        return;
    }
    let mag = held.node;

    if ctx.world.is_held(mag) {
        ctx.world.force_drop(mag);
    }

    let at = ctx.world.world_position(core.slide);
    ctx.world
        .play_at(&core.config.attach_cue.cue, at, core.config.attach_cue.volume);

    ctx.world.set_local_position(mag, Vec3::ZERO);

    // Rigidly couple to the weapon body so the magazine tracks it under
    // physics instead of lagging a frame behind. Without a parent body the
    // transform parenting stays the only constraint.
    if let Some(parent) = ctx.world.parent(core.slide) {
        if ctx.world.has_rigid_body(parent) {
            core.joint = Some(ctx.world.create_fixed_joint(mag, parent, Vec3::Y));
        }
    }

    ctx.world.set_grab_enabled(mag, false);

    core.snapped = true;
    core.in_place = true;
}
