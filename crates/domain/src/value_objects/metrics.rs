use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Usage counters maintained by the surrounding system.
///
/// The aggregate only ever replaces the whole value; counters are unsigned so
/// negative counts cannot be represented. Counters this crate does not track
/// are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub saves: u64,
    pub downloads: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metrics {
    pub fn new(saves: u64, downloads: u64) -> Self {
        Self {
            saves,
            downloads,
            extra: Map::new(),
        }
    }
}
