//! Scene graph arena and detached subtrees
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. Every
//! node keeps an explicit parent reference, so ancestor walks are plain
//! iteration. Nodes are never removed, which keeps ids stable for the life of
//! a scene.

use std::fmt;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Aabb;
use crate::transform::NodeTransform;

/// Identifier of a node inside a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Category bits used to filter hit-tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const NONE: Self = Self(0);
    /// Category every node starts with
    pub const DEFAULT: Self = Self(1);
    /// Marker for placed models that gestures may manipulate
    pub const INTERACTABLE_OBJECT: Self = Self(2);
    pub const ALL: Self = Self(u32::MAX);

    /// Check whether any bit is shared with `other`
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for CategoryMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::ops::BitOr for CategoryMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// A node stored in the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    name: Option<String>,
    pub transform: NodeTransform,
    pub category: CategoryMask,
    pub bounds: Option<Aabb>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn detached(subtree: &SceneSubtree) -> Self {
        Self {
            name: subtree.name.clone(),
            transform: subtree.transform,
            category: subtree.category,
            bounds: subtree.bounds,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A tree of node descriptions that is not part of any scene yet.
///
/// Model assets and the result of anchor resolution take this shape; the
/// session grafts them into its [`SceneGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSubtree {
    pub name: Option<String>,
    pub transform: NodeTransform,
    pub category: CategoryMask,
    pub bounds: Option<Aabb>,
    pub children: Vec<SceneSubtree>,
}

impl SceneSubtree {
    /// An empty, unnamed node
    pub fn empty() -> Self {
        Self {
            name: None,
            transform: NodeTransform::identity(),
            category: CategoryMask::DEFAULT,
            bounds: None,
            children: Vec::new(),
        }
    }

    /// An empty node with a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::empty()
        }
    }

    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_category(mut self, category: CategoryMask) -> Self {
        self.category = category;
        self
    }

    pub fn with_child(mut self, child: SceneSubtree) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search of the descendants for a node with `name`.
    /// The subtree root itself is not considered.
    pub fn find_descendant(&self, name: &str) -> Option<&SceneSubtree> {
        let mut stack: Vec<&SceneSubtree> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.name.as_deref() == Some(name) {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Set the category of this node and every descendant
    pub fn set_category_recursive(&mut self, category: CategoryMask) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.category = category;
            stack.extend(node.children.iter_mut());
        }
    }

    /// Number of nodes including the root
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneSubtree::node_count).sum::<usize>()
    }

    /// Check whether every node carries `category`
    pub fn all_in_category(&self, category: CategoryMask) -> bool {
        self.category == category && self.children.iter().all(|c| c.all_in_category(category))
    }
}

impl Default for SceneSubtree {
    fn default() -> Self {
        Self::empty()
    }
}

/// Iterator over a node and its ancestors, nearest first
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.graph.node(current).and_then(SceneNode::parent);
        Some(current)
    }
}

/// Arena-backed scene graph with a single root
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Create a scene containing only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode::detached(&SceneSubtree::empty())],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A scene always holds at least its root
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Name of a node, if it has one
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id)?.name()
    }

    /// Walk from `id` up to the root, starting with `id` itself
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// All descendants of `id` in depth-first order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let Some(node) = self.node(id) else {
            return result;
        };

        let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(node) = self.node(current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    /// Find a descendant of `id` by name, depth-first
    pub fn find_descendant(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|candidate| self.name(*candidate) == Some(name))
    }

    /// Add an empty, unnamed child under `parent`
    pub fn add_empty(&mut self, parent: NodeId) -> Result<NodeId> {
        self.attach_subtree(parent, &SceneSubtree::empty())
    }

    /// Graft a copy of `subtree` under `parent`, returning the id of its root
    pub fn attach_subtree(&mut self, parent: NodeId, subtree: &SceneSubtree) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(Error::UnknownNode(parent));
        }

        let root = self.push_child(parent, subtree);
        let mut pending: Vec<(NodeId, &SceneSubtree)> = vec![(root, subtree)];
        while let Some((id, current)) = pending.pop() {
            for child in &current.children {
                let child_id = self.push_child(id, child);
                pending.push((child_id, child));
            }
        }
        Ok(root)
    }

    fn push_child(&mut self, parent: NodeId, subtree: &SceneSubtree) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = SceneNode::detached(subtree);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set the category of `id` and all of its descendants
    pub fn set_category_recursive(&mut self, id: NodeId, category: CategoryMask) -> Result<()> {
        let node = self.node_mut(id).ok_or(Error::UnknownNode(id))?;
        node.category = category;
        for descendant in self.descendants(id) {
            self.nodes[descendant.0].category = category;
        }
        Ok(())
    }

    /// Local-to-world matrix of a node
    pub fn world_matrix(&self, id: NodeId) -> Option<Matrix4<f32>> {
        if !self.contains(id) {
            return None;
        }
        let matrix = self
            .ancestors(id)
            .fold(Matrix4::identity(), |acc, ancestor| {
                self.nodes[ancestor.0].transform.to_matrix() * acc
            });
        Some(matrix)
    }

    /// Iterate over all node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Point3f, Vector3f};
    use approx::assert_relative_eq;

    fn model_subtree() -> SceneSubtree {
        SceneSubtree::named("couchModel")
            .with_child(SceneSubtree::named("frame").with_child(SceneSubtree::named("leg")))
            .with_child(SceneSubtree::named("cushion"))
    }

    #[test]
    fn test_new_scene_has_root() {
        let scene = SceneGraph::new();
        assert_eq!(scene.len(), 1);
        assert!(scene.parent(scene.root()).is_none());
    }

    #[test]
    fn test_attach_subtree_links_parents() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let model = scene.attach_subtree(root, &model_subtree()).unwrap();

        assert_eq!(scene.len(), 5);
        assert_eq!(scene.parent(model), Some(root));
        let leg = scene.find_descendant(model, "leg").unwrap();
        let frame = scene.find_descendant(model, "frame").unwrap();
        assert_eq!(scene.parent(leg), Some(frame));
        assert_eq!(scene.node(root).unwrap().children(), &[model]);
    }

    #[test]
    fn test_attach_to_unknown_parent_fails() {
        let mut scene = SceneGraph::new();
        let result = scene.attach_subtree(NodeId(42), &SceneSubtree::empty());
        assert!(matches!(result, Err(Error::UnknownNode(_))));
    }

    #[test]
    fn test_ancestors_inclusive() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let model = scene.attach_subtree(root, &model_subtree()).unwrap();
        let leg = scene.find_descendant(model, "leg").unwrap();

        let chain: Vec<_> = scene.ancestors(leg).collect();
        assert_eq!(chain.len(), 4);
        assert_eq!(chain[0], leg);
        assert_eq!(chain[2], model);
        assert_eq!(chain[3], root);
        assert_eq!(scene.ancestors(NodeId(99)).count(), 0);
    }

    #[test]
    fn test_set_category_recursive() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let model = scene.attach_subtree(root, &model_subtree()).unwrap();
        scene.set_category_recursive(model, CategoryMask::INTERACTABLE_OBJECT).unwrap();

        for id in std::iter::once(model).chain(scene.descendants(model)) {
            assert_eq!(scene.node(id).unwrap().category, CategoryMask::INTERACTABLE_OBJECT);
        }
        assert_eq!(scene.node(root).unwrap().category, CategoryMask::DEFAULT);
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let parent = scene
            .attach_subtree(
                root,
                &SceneSubtree::empty().with_transform(NodeTransform {
                    position: Vector3f::new(1.0, 0.0, 2.0),
                    scale: Vector3f::new(2.0, 2.0, 2.0),
                    ..NodeTransform::identity()
                }),
            )
            .unwrap();
        let child = scene
            .attach_subtree(
                parent,
                &SceneSubtree::empty()
                    .with_transform(NodeTransform::from_position(Vector3f::new(0.0, 1.0, 0.0))),
            )
            .unwrap();

        let world = scene.world_matrix(child).unwrap();
        assert_relative_eq!(
            world.transform_point(&Point3f::origin()),
            Point3f::new(1.0, 2.0, 2.0)
        );
    }

    #[test]
    fn test_subtree_find_and_tag() {
        let mut subtree = SceneSubtree::empty().with_child(model_subtree());
        assert!(subtree.find_descendant("leg").is_some());
        assert!(subtree.find_descendant("lamp").is_none());

        subtree.set_category_recursive(CategoryMask::INTERACTABLE_OBJECT);
        assert!(subtree.all_in_category(CategoryMask::INTERACTABLE_OBJECT));
        assert_eq!(subtree.node_count(), 5);
    }

    #[test]
    fn test_category_mask_intersects() {
        let mask = CategoryMask::DEFAULT | CategoryMask::INTERACTABLE_OBJECT;
        assert!(mask.intersects(CategoryMask::INTERACTABLE_OBJECT));
        assert!(!CategoryMask::DEFAULT.intersects(CategoryMask::INTERACTABLE_OBJECT));
        assert!(!CategoryMask::NONE.intersects(CategoryMask::ALL));
    }
}
