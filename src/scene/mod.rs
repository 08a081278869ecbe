//! Scene layer - the collaborator contracts the slide core consumes, the
//! entity id vocabulary, the host-facing event log, and `StageScene`, the
//! reference implementation the wasm facade and the tests run against.

mod events;
mod stage;
mod traits;

pub use events::SceneEvent;
pub use stage::StageScene;
pub use traits::{AudioSink, GrabProvider, GrabZone, InteractionWorld, SceneWorld};

/// Scene node handle (arena index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Collider handle (arena index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderId(pub u32);

/// Fixed-joint handle (arena index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointId(pub u32);

/// Hand handle (arena index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandId(pub u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl ColliderId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl JointId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl HandId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
