//! Magwell Engine - slide attachment interaction logic in WASM
//!
//! Architecture:
//! - domain/  - configuration and input vocabulary
//! - scene/   - collaborator contracts, stage mirror, event log
//! - slide/   - the attachment state machine
//! - api/     - public wasm API

pub mod api;
pub mod domain;
pub mod scene;
pub mod slide;

// Re-export main types (keeps embedding paths short)
pub use api::wasm::SlideSim;
pub use domain::{GripTracker, HandSide, InputSnapshot, SlideConfig, SoundSpec};
pub use scene::{
    AudioSink, GrabProvider, GrabZone, InteractionWorld, SceneEvent, SceneWorld, StageScene,
};
pub use slide::{AttachmentState, HoldStatus, SlideCore, TickContext};

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🧲 Magwell WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
