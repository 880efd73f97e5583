//! Model assets and anchor resolution

use std::collections::HashMap;

use arplace_core::{
    Aabb, Anchor, AnchorResolver, CategoryMask, Point3f, SceneSubtree, Vector3f,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A loaded model scene and the name of the node that roots the model in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub scene: SceneSubtree,
    pub root_node_name: String,
}

impl ModelAsset {
    pub fn new(scene: SceneSubtree, root_node_name: impl Into<String>) -> Self {
        Self {
            scene,
            root_node_name: root_node_name.into(),
        }
    }

    /// The model's root node, searched among the scene's descendants
    pub fn root_node(&self) -> Option<&SceneSubtree> {
        self.scene.find_descendant(&self.root_node_name)
    }

    /// Built-in couch: a frame, two cushions and two armrests under
    /// `couchModel`, standing on the origin and facing +Z
    pub fn couch() -> Self {
        let part = |name: &str, center: [f32; 3], size: [f32; 3]| {
            SceneSubtree::named(name).with_bounds(Aabb::from_center_size(
                Point3f::new(center[0], center[1], center[2]),
                Vector3f::new(size[0], size[1], size[2]),
            ))
        };

        let model = SceneSubtree::named("couchModel")
            .with_child(part("frame", [0.0, 0.2, 0.0], [1.8, 0.3, 0.8]))
            .with_child(part("seat_cushion", [0.0, 0.4, 0.05], [1.6, 0.15, 0.7]))
            .with_child(part("back_cushion", [0.0, 0.6, -0.3], [1.6, 0.45, 0.2]))
            .with_child(part("armrest_left", [-0.85, 0.45, 0.0], [0.15, 0.5, 0.8]))
            .with_child(part("armrest_right", [0.85, 0.45, 0.0], [0.15, 0.5, 0.8]));

        let scene = SceneSubtree::empty()
            .with_child(SceneSubtree::named("camera"))
            .with_child(SceneSubtree::named("light"))
            .with_child(model);

        Self::new(scene, "couchModel")
    }
}

/// Resolves placement anchors to model subtrees by anchor name
#[derive(Debug, Clone)]
pub struct ModelLibrary {
    models: HashMap<String, ModelAsset>,
    interactable: CategoryMask,
}

impl ModelLibrary {
    /// Create an empty library tagging models as interactable objects
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            interactable: CategoryMask::INTERACTABLE_OBJECT,
        }
    }

    /// Library with the built-in couch registered under `"couch"`
    pub fn with_couch() -> Self {
        let mut library = Self::new();
        library.register("couch", ModelAsset::couch());
        library
    }

    /// Use a different category for resolved models
    pub fn with_interactable_mask(mut self, mask: CategoryMask) -> Self {
        self.interactable = mask;
        self
    }

    /// Register a model for anchors named `anchor_name`, returning any model
    /// it replaces
    pub fn register(&mut self, anchor_name: impl Into<String>, asset: ModelAsset) -> Option<ModelAsset> {
        self.models.insert(anchor_name.into(), asset)
    }

    pub fn get(&self, anchor_name: &str) -> Option<&ModelAsset> {
        self.models.get(anchor_name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorResolver for ModelLibrary {
    /// Wrapper node holding the tagged model root, or an empty node when the
    /// anchor has no registered model
    fn resolve_anchor(&self, anchor: &Anchor) -> SceneSubtree {
        let wrapper = SceneSubtree::empty();

        let Some(asset) = anchor.name.as_deref().and_then(|name| self.models.get(name)) else {
            return wrapper;
        };

        let Some(root) = asset.root_node() else {
            warn!(
                anchor = %anchor.id,
                root = %asset.root_node_name,
                "model asset has no root node"
            );
            return wrapper;
        };

        let mut model = root.clone();
        model.set_category_recursive(self.interactable);
        wrapper.with_child(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arplace_core::{AnchorId, WorldPose};

    fn anchor(name: &str) -> Anchor {
        Anchor::placement(AnchorId(1), name, WorldPose::identity())
    }

    #[test]
    fn test_couch_anchor_resolves_to_wrapped_tagged_model() {
        let library = ModelLibrary::with_couch();
        let subtree = library.resolve_anchor(&anchor("couch"));

        assert!(subtree.name.is_none());
        assert_eq!(subtree.category, CategoryMask::DEFAULT);
        assert_eq!(subtree.children.len(), 1);

        let model = &subtree.children[0];
        assert_eq!(model.name.as_deref(), Some("couchModel"));
        assert!(model.all_in_category(CategoryMask::INTERACTABLE_OBJECT));
        assert_eq!(model.node_count(), 6);
    }

    #[test]
    fn test_unknown_anchor_resolves_to_empty_node() {
        let library = ModelLibrary::with_couch();
        assert_eq!(library.resolve_anchor(&anchor("house")), SceneSubtree::empty());

        let plane = Anchor::plane(AnchorId(2), WorldPose::identity(), 1.0, 1.0);
        assert_eq!(library.resolve_anchor(&plane), SceneSubtree::empty());
    }

    #[test]
    fn test_asset_without_root_node_resolves_to_empty_node() {
        let mut library = ModelLibrary::new();
        library.register(
            "lamp",
            ModelAsset::new(SceneSubtree::empty().with_child(SceneSubtree::named("shade")), "lampModel"),
        );
        assert_eq!(library.resolve_anchor(&anchor("lamp")), SceneSubtree::empty());
    }

    #[test]
    fn test_resolution_does_not_touch_asset() {
        let library = ModelLibrary::with_couch();
        library.resolve_anchor(&anchor("couch"));
        let stored = library.get("couch").unwrap().root_node().unwrap();
        assert_eq!(stored.category, CategoryMask::DEFAULT);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut library = ModelLibrary::with_couch();
        let previous = library.register("couch", ModelAsset::new(SceneSubtree::empty(), "couchModel"));
        assert!(previous.is_some());
        assert_eq!(library.len(), 1);
    }
}
