//! A view that ties a tracking session to the interaction controller

use arplace_core::{AnchorResolver, GestureEvent, Result};
use arplace_interaction::{GestureOutcome, InteractionConfig, InteractionController};

use crate::camera::Camera;
use crate::config::SessionConfiguration;
use crate::session::{FrameStatistics, Session};

/// Routes gestures into the controller and session events into its hooks
pub struct ArView<R> {
    session: Session<R>,
    controller: InteractionController,
    configuration: SessionConfiguration,
}

impl<R: AnchorResolver> ArView<R> {
    pub fn new(
        configuration: SessionConfiguration,
        interaction: InteractionConfig,
        resolver: R,
        camera: Camera,
    ) -> Self {
        Self {
            session: Session::new(resolver, camera),
            controller: InteractionController::new(interaction),
            configuration,
        }
    }

    /// Start the session with the view's configuration (view appearing)
    pub fn run(&mut self) {
        self.session.run(self.configuration.clone());
    }

    /// Pause the session (view disappearing)
    pub fn pause(&mut self) {
        self.session.pause();
    }

    /// Hand a gesture to the controller
    pub fn handle_gesture(&mut self, event: &mut GestureEvent) -> GestureOutcome {
        self.controller.handle_event(&mut self.session, event)
    }

    /// Advance the session one frame and deliver its events
    pub fn update(&mut self) -> Result<FrameStatistics> {
        let stats = self.session.update()?;
        for event in self.session.drain_events() {
            event.deliver(&mut self.controller);
        }
        Ok(stats)
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<R> {
        &mut self.session
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn configuration(&self) -> &SessionConfiguration {
        &self.configuration
    }
}
