//! Slide attachment state machine.
//!
//! `SlideCore` owns at most one held magazine and drives the capture, snap,
//! unsnap, hand-off and ejection transitions each simulation tick. All scene
//! access goes through the collaborator contracts in `crate::scene`; the core
//! itself never touches ambient time or global state.

use crate::domain::{InputSnapshot, SlideConfig};
use crate::scene::{ColliderId, HandId, InteractionWorld, JointId, NodeId};

#[path = "update/tick.rs"]
mod tick;
#[path = "transitions/attach.rs"]
mod attach;
#[path = "transitions/detach.rs"]
mod detach;
#[path = "input/grip.rs"]
mod grip;
#[path = "eject/eject.rs"]
mod eject;
#[path = "capture/capture.rs"]
mod capture;

/// Re-snap suppression window after an eject, in seconds.
pub const EJECT_DEBOUNCE: f64 = 0.1;
/// Re-snap suppression window after a hand grabs the magazine, in seconds.
pub const GRAB_DEBOUNCE: f64 = 1.0;
/// Slide-local fallback offset the eject sequence nudges the magazine to.
pub const EJECT_CLEARANCE_Y: f32 = -0.2;

/// Derived attachment state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentState {
    Empty,
    InsertedFree,
    InsertedLocked,
}

impl AttachmentState {
    pub fn name(&self) -> &'static str {
        match self {
            AttachmentState::Empty => "empty",
            AttachmentState::InsertedFree => "insertedFree",
            AttachmentState::InsertedLocked => "insertedLocked",
        }
    }
}

/// Handle to the externally-owned magazine currently captured by the slide.
#[derive(Clone, Copy, Debug)]
pub struct HeldMagazine {
    pub node: NodeId,
    /// Collider disabled at capture; re-enabled when the magazine leaves.
    pub collider: Option<ColliderId>,
}

/// Ejection waiting on the next fixed physics step for its final unparent.
#[derive(Clone, Copy, Debug)]
struct PendingEject {
    node: NodeId,
}

/// Read-only "holding X at distance Y" snapshot for UI/debug consumers.
#[derive(Clone, Copy, Debug)]
pub struct HoldStatus {
    pub node: Option<NodeId>,
    pub distance: f32,
    pub state: AttachmentState,
}

/// Collaborator access bundle for one tick.
pub struct TickContext<'a> {
    pub world: &'a mut dyn InteractionWorld,
    pub input: InputSnapshot,
    /// Absolute simulation time in seconds.
    pub now: f64,
}

/// The slide attachment controller.
pub struct SlideCore {
    config: SlideConfig,
    slide: NodeId,
    held: Option<HeldMagazine>,
    snapped: bool,
    in_place: bool,
    joint: Option<JointId>,
    last_eject_time: f64,
    pending_eject: Option<PendingEject>,
    last_distance: f32,
}

impl SlideCore {
    pub fn new(slide: NodeId, config: SlideConfig) -> Self {
        Self {
            config,
            slide,
            held: None,
            snapped: false,
            in_place: false,
            joint: None,
            last_eject_time: f64::NEG_INFINITY,
            pending_eject: None,
            last_distance: 0.0,
        }
    }

    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SlideConfig) {
        self.config = config;
    }

    pub fn slide_node(&self) -> NodeId {
        self.slide
    }

    pub fn held(&self) -> Option<&HeldMagazine> {
        self.held.as_ref()
    }

    pub fn state(&self) -> AttachmentState {
        match (self.held.is_some(), self.snapped && self.in_place) {
            (false, _) => AttachmentState::Empty,
            (true, false) => AttachmentState::InsertedFree,
            (true, true) => AttachmentState::InsertedLocked,
        }
    }

    pub fn status(&self) -> HoldStatus {
        HoldStatus {
            node: self.held.map(|h| h.node),
            distance: self.last_distance,
            state: self.state(),
        }
    }

    /// Per-tick update; call once per frame after host input and physics
    /// have settled.
    pub fn step(&mut self, ctx: &mut TickContext) {
        tick::step(self, ctx);
    }

    /// Fixed-physics-step boundary; completes a pending ejection.
    pub fn on_physics_step(&mut self, ctx: &mut TickContext) {
        eject::on_physics_step(self, ctx);
    }

    /// Force-eject the held magazine. No-op when nothing is held.
    pub fn eject(&mut self, ctx: &mut TickContext) {
        eject::eject(self, ctx);
    }

    /// Detach and free the held magazine; `None` when nothing is held.
    pub fn detach(&mut self, ctx: &mut TickContext) -> Option<NodeId> {
        detach::detach(self, ctx)
    }

    /// Hand the magazine off to `hand` (the manual pull-out path).
    pub fn hand_off(&mut self, ctx: &mut TickContext, hand: HandId) {
        grip::hand_off(self, ctx, hand);
    }

    /// Proximity-capture entry point for the slide's trigger volume.
    pub fn on_capture_volume_entered(&mut self, ctx: &mut TickContext, node: NodeId) {
        capture::on_capture_volume_entered(self, ctx, node);
    }

    /// Programmatic capture (e.g. pre-loading a magazine at init).
    pub fn capture(&mut self, ctx: &mut TickContext, node: NodeId) {
        capture::capture(self, ctx, node);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
