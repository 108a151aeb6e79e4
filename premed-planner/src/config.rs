use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TRACKS: [&str; 6] = [
    "Pre-Med",
    "Pre-Dental",
    "Pre-Pharmacy",
    "Pre-PA",
    "Pre-Nursing",
    "Pre-Vet",
];

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub storage: StorageConfig,
    /// Study tracks offered when adding a task.
    pub tracks: Vec<String>,
    /// Track preselected for new tasks.
    pub default_track: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per collection.
    pub directory: PathBuf,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            tracks: DEFAULT_TRACKS.iter().map(|track| track.to_string()).collect(),
            default_track: DEFAULT_TRACKS[0].to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("premed-data"),
        }
    }
}

impl PlannerConfig {
    /// Loads the configuration file at `path`; keys it omits take defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Whether `track` is one of the configured study tracks.
    pub fn is_known_track(&self, track: &str) -> bool {
        self.tracks.iter().any(|known| known == track)
    }
}
