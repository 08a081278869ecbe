use glam::{Quat, Vec3};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::domain::{GripTracker, HandSide, InputSnapshot, SlideConfig};
use crate::scene::{HandId, NodeId, SceneWorld, StageScene};
use crate::slide::{AttachmentState, SlideCore, TickContext};

/// Simulation facade: one slide attachment controller running against the
/// stage mirror. The host synchronizes node/hand transforms and grip levels,
/// calls `step` once per frame and `physics_step` at each fixed-step
/// boundary, and drains the event log to apply sounds and impulses for real.
#[wasm_bindgen]
pub struct SlideSim {
    core: SlideCore,
    stage: StageScene,
    grip: GripTracker,
    time: f64,
}

#[wasm_bindgen]
impl SlideSim {
    /// Stage pre-seeded with a weapon body (rigid) and the slide under it,
    /// both at the origin.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let mut stage = StageScene::new();
        let weapon = stage.spawn_node("WeaponBody", false, true, false);
        let slide = stage.spawn_node("MagazineSlide", false, false, false);
        stage.set_parent(slide, Some(weapon));
        stage.set_zone(slide, 0.25);

        Self {
            core: SlideCore::new(slide, SlideConfig::default()),
            stage,
            grip: GripTracker::new(),
            time: 0.0,
        }
    }

    pub fn load_config(&mut self, json: String) -> Result<(), JsValue> {
        let config = SlideConfig::from_bundle_json(&json).map_err(|e| JsValue::from_str(&e))?;
        self.core.set_config(config);
        Ok(())
    }

    pub fn config_json(&self) -> String {
        self.core.config().manifest_json()
    }

    // === STAGE SYNC ===

    /// Mirror a host scene node. Returns its id.
    pub fn spawn_node(
        &mut self,
        name: String,
        grabbable: bool,
        rigid_body: bool,
        with_collider: bool,
    ) -> u32 {
        self.stage
            .spawn_node(&name, grabbable, rigid_body, with_collider)
            .0
    }

    pub fn slide_node(&self) -> u32 {
        self.core.slide_node().0
    }

    pub fn set_node_world_position(&mut self, node: u32, x: f32, y: f32, z: f32) {
        self.stage
            .set_world_position(NodeId(node), Vec3::new(x, y, z));
    }

    pub fn set_node_world_rotation(&mut self, node: u32, x: f32, y: f32, z: f32, w: f32) {
        self.stage
            .set_world_rotation(NodeId(node), Quat::from_xyzw(x, y, z, w));
    }

    /// Register a hand; `side` is 0 (left) or 1 (right).
    pub fn add_hand(&mut self, side: u8) -> Result<u32, JsValue> {
        let side = HandSide::from_index(side)
            .ok_or_else(|| JsValue::from_str("hand side must be 0 (left) or 1 (right)"))?;
        Ok(self.stage.add_hand(side).0)
    }

    pub fn set_hand_world_position(&mut self, hand: u32, x: f32, y: f32, z: f32) {
        self.stage
            .set_hand_world_position(HandId(hand), Vec3::new(x, y, z));
    }

    pub fn set_zone_range(&mut self, range: f32) {
        self.stage.set_zone_range(range);
    }

    /// Host reports a hand picked the node up.
    pub fn notify_grabbed(&mut self, node: u32, hand: u32) {
        self.stage.notify_grabbed(NodeId(node), HandId(hand));
    }

    /// Host reports the node left whichever hand held it.
    pub fn notify_released(&mut self, node: u32) {
        self.stage.notify_released(NodeId(node));
    }

    // === INPUT ===

    /// Grip level for one side; just-pressed edges are derived internally.
    pub fn set_grip(&mut self, side: u8, pressed: bool) {
        if let Some(side) = HandSide::from_index(side) {
            self.grip.set_level(side, pressed);
        }
    }

    // === COMMANDS ===

    /// A foreign node entered the slide's capture volume.
    pub fn enter_capture_volume(&mut self, node: u32) {
        let mut ctx = Self::command_ctx(&mut self.stage, self.time);
        self.core.on_capture_volume_entered(&mut ctx, NodeId(node));
    }

    /// Programmatic capture (pre-load a magazine).
    pub fn attach_magazine(&mut self, node: u32) {
        let mut ctx = Self::command_ctx(&mut self.stage, self.time);
        self.core.capture(&mut ctx, NodeId(node));
    }

    /// Force-eject the held magazine.
    pub fn eject(&mut self) {
        let mut ctx = Self::command_ctx(&mut self.stage, self.time);
        self.core.eject(&mut ctx);
    }

    // === LOOP ===

    /// Advance the clock and run the per-tick update.
    pub fn step(&mut self, dt: f64) {
        self.time += dt;
        self.stage.set_time(self.time);
        let input = self.grip.take_edges();
        let mut ctx = TickContext {
            world: &mut self.stage,
            input,
            now: self.time,
        };
        self.core.step(&mut ctx);
    }

    /// Fixed-physics-step boundary; completes a pending ejection.
    pub fn physics_step(&mut self) {
        let mut ctx = Self::command_ctx(&mut self.stage, self.time);
        self.core.on_physics_step(&mut ctx);
    }

    // === OBSERVABLES ===

    /// Drain the event log as one JSON array string.
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.stage.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Drain the event log as a JS array of per-event JSON strings.
    pub fn drain_events(&mut self) -> js_sys::Array {
        let out = js_sys::Array::new();
        for event in self.stage.drain_events() {
            let json = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
            out.push(&JsValue::from_str(&json));
        }
        out
    }

    /// "Currently holding X at distance Y" snapshot for UI/debug.
    pub fn status_json(&self) -> String {
        let status = self.core.status();
        let out = StatusOut {
            held: status.node.map(|n| n.0),
            distance: status.distance,
            state: status.state.name(),
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }

    /// Held node id, or -1 when the slide is empty.
    pub fn held_node(&self) -> i32 {
        self.core.held().map(|h| h.node.0 as i32).unwrap_or(-1)
    }

    pub fn is_locked(&self) -> bool {
        self.core.state() == AttachmentState::InsertedLocked
    }

    pub fn held_distance(&self) -> f32 {
        self.core.status().distance
    }
}

impl SlideSim {
    fn command_ctx<'a>(stage: &'a mut StageScene, time: f64) -> TickContext<'a> {
        TickContext {
            world: stage,
            input: InputSnapshot::default(),
            now: time,
        }
    }
}

impl Default for SlideSim {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    held: Option<u32>,
    distance: f32,
    state: &'static str,
}
