//! Mapping a hit-tested node back to the model it belongs to

use arplace_core::{NodeId, SceneGraph};

/// Walk from `start` towards the root and return the first node named
/// `model_name`, `start` included.
pub fn find_model_node(scene: &SceneGraph, start: NodeId, model_name: &str) -> Option<NodeId> {
    scene
        .ancestors(start)
        .find(|id| scene.name(*id) == Some(model_name))
}

/// The node gestures manipulate: the wrapper directly above the model node.
///
/// The wrapper carries placement transforms so the model keeps its authored
/// local frame. Returns `None` when no model node is found or it has no
/// parent.
pub fn resolve_manipulation_target(
    scene: &SceneGraph,
    start: NodeId,
    model_name: &str,
) -> Option<NodeId> {
    let model = find_model_node(scene, start, model_name)?;
    scene.parent(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arplace_core::SceneSubtree;

    fn placed_scene() -> (SceneGraph, NodeId) {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let anchor = scene.add_empty(root).unwrap();
        let wrapper = scene
            .attach_subtree(
                anchor,
                &SceneSubtree::empty().with_child(
                    SceneSubtree::named("couchModel").with_child(
                        SceneSubtree::named("frame")
                            .with_child(SceneSubtree::named("leg").with_child(SceneSubtree::named("foot"))),
                    ),
                ),
            )
            .unwrap();
        (scene, wrapper)
    }

    #[test]
    fn test_model_node_resolves_to_wrapper() {
        let (scene, wrapper) = placed_scene();
        let model = scene.find_descendant(wrapper, "couchModel").unwrap();
        assert_eq!(find_model_node(&scene, model, "couchModel"), Some(model));
        assert_eq!(resolve_manipulation_target(&scene, model, "couchModel"), Some(wrapper));
    }

    #[test]
    fn test_nested_child_resolves_like_model_node() {
        let (scene, wrapper) = placed_scene();
        let model = scene.find_descendant(wrapper, "couchModel").unwrap();
        let foot = scene.find_descendant(wrapper, "foot").unwrap();
        assert_eq!(
            resolve_manipulation_target(&scene, foot, "couchModel"),
            resolve_manipulation_target(&scene, model, "couchModel"),
        );
    }

    #[test]
    fn test_unrelated_node_does_not_resolve() {
        let (mut scene, _) = placed_scene();
        let root = scene.root();
        let plane = scene.attach_subtree(root, &SceneSubtree::named("plane")).unwrap();
        assert!(find_model_node(&scene, plane, "couchModel").is_none());
        assert!(resolve_manipulation_target(&scene, plane, "couchModel").is_none());
    }

    #[test]
    fn test_scene_root_has_no_target() {
        let scene = SceneGraph::new();
        let root = scene.root();
        assert!(resolve_manipulation_target(&scene, root, "couchModel").is_none());
    }
}
