use serde::{Deserialize, Serialize};

/// A sound cue reference plus playback volume.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundSpec {
    pub cue: String,
    pub volume: f32,
}

impl SoundSpec {
    pub fn new(cue: &str, volume: f32) -> Self {
        Self {
            cue: cue.to_string(),
            volume,
        }
    }
}

/// Tunable parameters of one slide attachment controller.
///
/// Loaded from a JSON bundle authored next to the rest of the content;
/// missing fields fall back to the defaults below, unknown fields are
/// ignored.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideConfig {
    /// Substring a node's name must contain to qualify for capture.
    pub acceptable_name: String,
    /// Distance below which the magazine snaps and locks.
    pub snap_distance: f32,
    /// Distance at or above which a free magazine releases.
    /// Must be >= `snap_distance` (hysteresis band).
    pub unsnap_distance: f32,
    /// Velocity-change magnitude applied on forced ejection.
    pub eject_force: f32,
    pub attach_cue: SoundSpec,
    pub detach_cue: SoundSpec,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            acceptable_name: "Filter".to_string(),
            snap_distance: 0.075,
            unsnap_distance: 0.15,
            eject_force: 1.5,
            attach_cue: SoundSpec::new("slide_attach", 0.5),
            detach_cue: SoundSpec::new("slide_detach", 0.4),
        }
    }
}

impl SlideConfig {
    pub fn from_bundle_json(json: &str) -> Result<Self, String> {
        let bundle: ConfigBundle = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let defaults = Self::default();

        let config = Self {
            acceptable_name: bundle.acceptable_name.unwrap_or(defaults.acceptable_name),
            snap_distance: bundle.snap_distance.unwrap_or(defaults.snap_distance),
            unsnap_distance: bundle.unsnap_distance.unwrap_or(defaults.unsnap_distance),
            eject_force: bundle.eject_force.unwrap_or(defaults.eject_force),
            attach_cue: bundle
                .attach_cue
                .map(SoundSpec::from)
                .unwrap_or(defaults.attach_cue),
            detach_cue: bundle
                .detach_cue
                .map(SoundSpec::from)
                .unwrap_or(defaults.detach_cue),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.snap_distance.is_finite() || self.snap_distance <= 0.0 {
            return Err(format!(
                "snapDistance must be a positive number: {}",
                self.snap_distance
            ));
        }
        if !self.unsnap_distance.is_finite() || self.unsnap_distance < self.snap_distance {
            return Err(format!(
                "unsnapDistance {} must be >= snapDistance {}",
                self.unsnap_distance, self.snap_distance
            ));
        }
        if !self.eject_force.is_finite() || self.eject_force < 0.0 {
            return Err(format!(
                "ejectForce must be non-negative: {}",
                self.eject_force
            ));
        }
        if self.acceptable_name.is_empty() {
            return Err("acceptableName must not be empty".to_string());
        }
        Ok(())
    }

    pub fn manifest_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigBundle {
    #[serde(default)]
    acceptable_name: Option<String>,
    #[serde(default)]
    snap_distance: Option<f32>,
    #[serde(default)]
    unsnap_distance: Option<f32>,
    #[serde(default)]
    eject_force: Option<f32>,
    #[serde(default)]
    attach_cue: Option<BundleSound>,
    #[serde(default)]
    detach_cue: Option<BundleSound>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleSound {
    cue: String,
    #[serde(default = "default_volume")]
    volume: f32,
}

fn default_volume() -> f32 {
    0.5
}

impl From<BundleSound> for SoundSpec {
    fn from(sound: BundleSound) -> Self {
        Self {
            cue: sound.cue,
            volume: sound.volume,
        }
    }
}
