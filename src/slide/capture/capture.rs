use crate::scene::{GrabProvider, NodeId, SceneWorld};

use super::{HeldMagazine, SlideCore, TickContext};

/// Trigger-volume entry: capture a qualifying magazine when the slide is
/// empty. Eligibility: grab capability present and a name containing the
/// configured substring.
pub(super) fn on_capture_volume_entered(core: &mut SlideCore, ctx: &mut TickContext, node: NodeId) {
    if core.held.is_some() {
        return;
    }
    if !ctx.world.is_grabbable(node) {
        return;
    }
    if !ctx
        .world
        .node_name(node)
        .contains(core.config.acceptable_name.as_str())
    {
        return;
    }
    capture(core, ctx, node);
}

/// Capture `node` as the held magazine: store it and its collider, bring it
/// under the slide frame, and disable the collider for the slide-in motion.
pub(super) fn capture(core: &mut SlideCore, ctx: &mut TickContext, node: NodeId) {
    if core.held.is_some() {
        return;
    }

    let collider = ctx.world.collider_of(node);
    core.held = Some(HeldMagazine { node, collider });

    ctx.world.set_parent(node, Some(core.slide));
    if let Some(collider) = collider {
        ctx.world.set_collider_enabled(collider, false);
    }
}
