//! Placement Walkthrough
//!
//! Runs a scripted session: a floor is detected, a tap places the couch, then
//! it is dragged, pinched and rotated. Each gesture's outcome is printed along
//! with the final transform of the couch.
//!
//! Run with `RUST_LOG=debug` to see the session and controller logs.

use std::path::PathBuf;

use anyhow::{bail, Context};
use arplace_core::{
    GestureEvent, GesturePhase, NodeId, Point3f, ScreenPoint, TrackingScene, WorldPose,
};
use arplace_interaction::{GestureOutcome, InteractionConfig};
use arplace_session::{ArView, Camera, ModelLibrary, PlaneAlignment, SessionConfiguration};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Seat height of the built-in couch, in model space
const SEAT_HEIGHT: f32 = 0.4;

/// Number of pan events a drag is split into
const DRAG_STEPS: usize = 8;

/// Camera turn around the couch before the last gesture, in radians
const ORBIT_STEP: f32 = 0.6;

#[derive(Parser, Debug)]
#[command(name = "placement_walkthrough", about = "Scripted tap-to-place session")]
struct Args {
    /// TOML file with `[session]` and `[interaction]` tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pinch factor applied to the placed model
    #[arg(long, default_value_t = 2.0)]
    pinch: f32,

    /// Rotation applied to the placed model, in radians
    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    rotate: f32,

    /// World X the couch is dragged towards
    #[arg(long, default_value_t = 1.3, allow_hyphen_values = true)]
    drag_x: f32,

    /// World Z the couch is dragged towards
    #[arg(long, default_value_t = 2.6, allow_hyphen_values = true)]
    drag_z: f32,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppConfig {
    session: SessionConfiguration,
    interaction: InteractionConfig,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Screen location of a point `height` above the couch's footprint center
fn couch_on_screen(view: &ArView<ModelLibrary>, wrapper: NodeId, height: f32) -> Option<ScreenPoint> {
    let world = view.session().scene().world_matrix(wrapper)?;
    let point = world.transform_point(&Point3f::new(0.0, height, 0.0));
    view.session().camera().project(&point)
}

fn report(step: &str, outcome: &GestureOutcome) {
    println!("   {step:<16} {outcome:?}");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = load_config(args.config.as_ref())?;
    info!(config = ?args.config, "starting walkthrough");

    println!("=== Placement Walkthrough ===\n");

    let camera = Camera::looking_at(Point3f::new(1.0, 1.5, 4.5), Point3f::new(1.0, 0.3, 2.0));
    let library = ModelLibrary::with_couch().with_interactable_mask(config.interaction.interactable_mask);
    let mut view = ArView::new(config.session, config.interaction, library, camera);
    view.run();

    // 1. Plane detection
    println!("1. Detecting the floor:");
    let floor = view
        .session_mut()
        .detect_plane(Point3f::origin(), 6.0, 6.0, PlaneAlignment::Horizontal)?;
    let Some(floor) = floor else {
        bail!("plane detection is configured to ignore horizontal planes");
    };
    view.update()?;
    println!("   Floor anchor: {floor}");

    // 2. Tap to place
    println!("\n2. Tapping the floor:");
    let floor_point = Point3f::new(1.0, 0.0, 2.0);
    let tap_at = view
        .session()
        .camera()
        .project(&floor_point)
        .context("floor point is behind the camera")?;
    let outcome = view.handle_gesture(&mut GestureEvent::tap(tap_at));
    report("tap", &outcome);
    let GestureOutcome::AnchorRequested(anchor) = outcome else {
        bail!("tap did not place the model");
    };
    view.update()?;

    let anchor_node = view
        .session()
        .anchor_node(anchor)
        .context("anchor was not resolved")?;
    let model_name = view.controller().config().model_node_name.clone();
    let scene = view.session().scene();
    let model = scene
        .find_descendant(anchor_node, &model_name)
        .with_context(|| format!("no `{model_name}` node under the anchor"))?;
    let wrapper = scene.parent(model).context("model has no wrapper")?;
    println!("   Model node {model} wrapped by {wrapper}");

    // 3. Drag
    println!("\n3. Dragging towards ({}, {}):", args.drag_x, args.drag_z);
    // Grab the couch where it stands on the floor so the first frame does not jump
    let start = couch_on_screen(&view, wrapper, 0.0).context("couch is off screen")?;
    let end = view
        .session()
        .camera()
        .project(&Point3f::new(args.drag_x, 0.0, args.drag_z))
        .context("drag target is behind the camera")?;
    let outcome = view.handle_gesture(&mut GestureEvent::pan(start, GesturePhase::Began));
    report("pan began", &outcome);
    let mut moved = 0;
    for step in 1..=DRAG_STEPS {
        let t = step as f32 / DRAG_STEPS as f32;
        let at = ScreenPoint::new(
            start.x + (end.x - start.x) * t,
            start.y + (end.y - start.y) * t,
        );
        let outcome = view.handle_gesture(&mut GestureEvent::pan(at, GesturePhase::Changed));
        if outcome.is_applied() {
            moved += 1;
        }
        report("pan changed", &outcome);
    }
    let outcome = view.handle_gesture(&mut GestureEvent::pan(end, GesturePhase::Ended));
    report("pan ended", &outcome);
    println!("   {moved}/{DRAG_STEPS} drag frames moved the couch");

    // 4. Pinch
    println!("\n4. Pinching by {}:", args.pinch);
    let at = couch_on_screen(&view, wrapper, SEAT_HEIGHT).context("couch is off screen")?;
    let mut pinch = GestureEvent::pinch(at, args.pinch, GesturePhase::Changed);
    report("pinch changed", &view.handle_gesture(&mut pinch));
    report("pinch ended", &view.handle_gesture(&mut GestureEvent::pinch(at, 1.0, GesturePhase::Ended)));

    // 5. Rotate
    println!("\n5. Rotating by {} rad:", args.rotate);
    let at = couch_on_screen(&view, wrapper, SEAT_HEIGHT).context("couch is off screen")?;
    for (rotation, phase) in [
        (0.0, GesturePhase::Began),
        (args.rotate, GesturePhase::Changed),
        (args.rotate, GesturePhase::Ended),
    ] {
        let outcome = view.handle_gesture(&mut GestureEvent::rotate(at, rotation, phase));
        report(&format!("rotate {phase:?}").to_lowercase(), &outcome);
    }

    // 6. Another viewpoint
    println!("\n6. Walking around the couch:");
    let target = WorldPose::from(
        view.session()
            .scene()
            .world_matrix(wrapper)
            .context("wrapper node vanished")?,
    )
    .translation();
    let camera = view.session_mut().camera_mut();
    camera.target = target;
    camera.orbit(ORBIT_STEP, 0.0);
    println!("   Camera now at {:?}", camera.position);
    let at = couch_on_screen(&view, wrapper, SEAT_HEIGHT).context("couch is off screen")?;
    let outcome = view.handle_gesture(&mut GestureEvent::pinch(at, 1.0, GesturePhase::Ended));
    report("pinch ended", &outcome);
    if outcome == GestureOutcome::Idle {
        println!("   Couch is still under the finger from the new side");
    }

    // 7. Interruption
    println!("\n7. Interrupting the session:");
    view.session_mut().interrupt();
    view.update()?;
    view.session_mut().end_interruption();
    let stats = view.update()?;
    println!("   State: {:?}", view.session().state());

    let transform = view
        .session()
        .scene()
        .node(wrapper)
        .context("wrapper node vanished")?
        .transform;
    println!("\n=== Result ===");
    println!("   Position:  {:?}", transform.position);
    println!("   Yaw:       {:.3} rad", transform.euler_angles.y);
    println!("   Scale:     {:?}", transform.scale);
    println!(
        "   Committed: {:.3} rad",
        view.controller().rotation_state().current_angle_y()
    );
    println!(
        "   Frames: {}, nodes: {}, anchors: {}",
        stats.frame, stats.nodes, stats.anchors
    );

    view.pause();
    Ok(())
}
