//! # arplace
//!
//! Tap-to-place interaction for a single AR model.
//!
//! This is the umbrella crate that provides convenient access to all arplace
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Scene graph, anchors, poses, gestures and collaborator traits
//! - **Interaction**: The controller turning gestures into model transforms
//! - **Session**: In-memory tracking session, hit-testing and model library
//!
//! ## Quick Start
//!
//! ```rust
//! use arplace::prelude::*;
//!
//! let camera = Camera::looking_at(Point3f::new(1.0, 1.5, 4.5), Point3f::new(1.0, 0.3, 2.0));
//! let mut view = ArView::new(
//!     SessionConfiguration::default(),
//!     InteractionConfig::default(),
//!     ModelLibrary::with_couch(),
//!     camera,
//! );
//! view.run();
//! view.session_mut()
//!     .detect_plane(Point3f::origin(), 6.0, 6.0, PlaneAlignment::Horizontal)
//!     .unwrap();
//!
//! let floor = view.session().camera().project(&Point3f::new(1.0, 0.0, 2.0)).unwrap();
//! let outcome = view.handle_gesture(&mut GestureEvent::tap(floor));
//! assert!(outcome.is_applied());
//! view.update().unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables interaction and session
//! - `interaction`: The interaction controller
//! - `session`: The in-memory tracking session (implies `interaction`)

// Re-export core functionality
pub use arplace_core::*;

// Re-export sub-crates
#[cfg(feature = "interaction")]
pub use arplace_interaction as interaction;

#[cfg(feature = "session")]
pub use arplace_session as session;

/// Convenient imports for common use cases
pub mod prelude {
    pub use arplace_core::*;

    #[cfg(feature = "interaction")]
    pub use arplace_interaction::*;

    #[cfg(feature = "session")]
    pub use arplace_session::*;
}
