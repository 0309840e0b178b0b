use serde::{Deserialize, Serialize};

/// Which side keeps its id when a wire shorts two nodes together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// The node with the lower id absorbs the other one.
    #[default]
    LowerIdAbsorbs,
    /// The node reached through the first endpoint absorbs the other one.
    FirstEndpointAbsorbs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub merge_policy: MergePolicy,
    /// Queue `ModelEvent`s for the controller. Turn off when nobody drains them.
    pub record_events: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::default(),
            record_events: true,
        }
    }
}
