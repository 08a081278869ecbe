use crate::scene::{GrabProvider, GrabZone, HandId};

use super::{detach, SlideCore, TickContext};

/// Route grip edges: a just-pressed grip on the side of the nearest open
/// hand inside the grab zone pulls the magazine out into that hand.
/// Hosts without a grab zone never answer the query, which disables this
/// path entirely.
pub(super) fn route_grab_input(core: &mut SlideCore, ctx: &mut TickContext) {
    if core.held.is_none() {
        return;
    }
    let Some((hand, side)) = ctx.world.nearest_open_hand() else {
        return;
    };
    if ctx.input.just_pressed(side) {
        hand_off(core, ctx, hand);
    }
}

/// Hand the magazine to `hand`: restore its grab capability, fully free it,
/// then command the grab. The only manual pull-out path; bypasses the eject
/// force.
pub(super) fn hand_off(core: &mut SlideCore, ctx: &mut TickContext, hand: HandId) {
    let Some(held) = core.held else {
        return;
    };
    ctx.world.set_grab_enabled(held.node, true);
    let Some(mag) = detach::detach(core, ctx) else {
        return;
    };
    ctx.world.force_grab(hand, mag);
}
