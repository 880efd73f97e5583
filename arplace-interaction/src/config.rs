//! Interaction configuration

use arplace_core::CategoryMask;
use serde::{Deserialize, Serialize};

/// How many placed models a tap may create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Ignore taps once one anchor has been placed
    SingleInstance,
    /// Every tap over a plane adds another anchor
    Unlimited,
}

/// Names and filters the controller uses to find its model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Name given to anchors created by a tap
    pub anchor_name: String,
    /// Name of the model's root node inside the placed subtree
    pub model_node_name: String,
    /// Category nodes must carry to be picked by pan, pinch and rotate
    pub interactable_mask: CategoryMask,
    pub placement: PlacementPolicy,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            anchor_name: "couch".to_string(),
            model_node_name: "couchModel".to_string(),
            interactable_mask: CategoryMask::INTERACTABLE_OBJECT,
            placement: PlacementPolicy::SingleInstance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_couch() {
        let config = InteractionConfig::default();
        assert_eq!(config.anchor_name, "couch");
        assert_eq!(config.model_node_name, "couchModel");
        assert_eq!(config.interactable_mask, CategoryMask::INTERACTABLE_OBJECT);
        assert_eq!(config.placement, PlacementPolicy::SingleInstance);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: InteractionConfig = toml::from_str(
            r#"
            anchor_name = "lamp"
            placement = "unlimited"
            "#,
        )
        .unwrap();
        assert_eq!(config.anchor_name, "lamp");
        assert_eq!(config.model_node_name, "couchModel");
        assert_eq!(config.placement, PlacementPolicy::Unlimited);
    }
}
