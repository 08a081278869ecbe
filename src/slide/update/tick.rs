use glam::{Quat, Vec3};

use crate::scene::{GrabProvider, SceneWorld};

use super::{attach, detach, grip, SlideCore, TickContext, EJECT_DEBOUNCE, GRAB_DEBOUNCE};

pub(super) fn step(core: &mut SlideCore, ctx: &mut TickContext) {
    if core.held.is_none() {
        return;
    }

    // A matching grip edge can hand the magazine off to a hand; everything
    // below must see the post-hand-off state.
    grip::route_grab_input(core, ctx);
    let Some(mag) = core.held.map(|h| h.node) else {
        return;
    };

    ctx.world.set_parent(mag, Some(core.slide));

    if core.snapped {
        ctx.world.set_local_position(mag, Vec3::ZERO);
        ctx.world.set_local_rotation(mag, Quat::IDENTITY);
        return;
    }

    // Free to slide along local Y, but never past the receptacle mouth.
    let mut local = ctx.world.local_position(mag);
    if local.y > 0.0 {
        local.y = 0.0;
        ctx.world.set_local_position(mag, local);
    }
    ctx.world.set_local_rotation(mag, Quat::IDENTITY);

    let distance = ctx.world.distance_between(core.slide, mag);
    core.last_distance = distance;

    let recently_grabbed = ctx.now - ctx.world.last_grab_time(mag) < GRAB_DEBOUNCE;
    let recently_ejected = ctx.now - core.last_eject_time < EJECT_DEBOUNCE;

    if distance < core.config.snap_distance {
        if !core.snapped && !recently_ejected && !recently_grabbed {
            attach::attach(core, ctx);
        }
        // Keep the magazine flush while it slides the last stretch in.
        if !ctx.world.is_held(mag) {
            ctx.world.set_local_position(mag, Vec3::ZERO);
        }
    } else if distance >= core.config.unsnap_distance && !recently_ejected {
        detach::detach(core, ctx);
    }
}
