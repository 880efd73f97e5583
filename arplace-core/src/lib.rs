//! Core data structures and traits for arplace
//!
//! This crate provides the types shared by the interaction layer and the
//! tracking session: screen points, world poses, node transforms, the scene
//! graph, anchors, gesture events and the collaborator traits.

pub mod point;
pub mod transform;
pub mod geometry;
pub mod scene;
pub mod anchor;
pub mod gesture;
pub mod traits;
pub mod error;

pub use point::*;
pub use transform::*;
pub use geometry::*;
pub use scene::*;
pub use anchor::*;
pub use gesture::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
