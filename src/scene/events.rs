use serde::Serialize;

/// Host-facing record of the side effects the state machine requested.
///
/// The stage appends; the facade drains once per frame so the host can play
/// the audio and apply the physics commands for real.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SceneEvent {
    Sound {
        cue: String,
        position: [f32; 3],
        volume: f32,
    },
    Impulse {
        node: u32,
        velocity_change: [f32; 3],
    },
    JointCreated {
        joint: u32,
        node: u32,
        connected: u32,
        axis: [f32; 3],
    },
    JointRemoved {
        joint: u32,
    },
    GrabForced {
        hand: u32,
        node: u32,
    },
    DropForced {
        node: u32,
    },
}
