use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use vrspace_assets::{EnvironmentConfig, EnvironmentManifest};
use vrspace_common::{Hand, Transform};
use vrspace_input::{ButtonId, ControllerInput, FrameInput};
use vrspace_interaction::GrabState;
use vrspace_session::Session;
use vrspace_tools::SceneInspector;
use vrspace_xr::ScriptedXr;

#[derive(Parser)]
#[command(name = "vrspace-cli", about = "CLI for the vrspace VR interaction sample")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Bootstrap the demo environment and run the scripted headless session
    Run {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Environment manifest file (defaults to the built-in demo)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
    /// Load an environment manifest and report its contents
    Validate {
        /// Manifest file to check
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("vrspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", vrspace_common::crate_info());
            println!("scene: {}", vrspace_scene::crate_info());
            println!("input: {}", vrspace_input::crate_info());
            println!("xr: {}", vrspace_xr::crate_info());
            println!("interaction: {}", vrspace_interaction::crate_info());
            println!("assets: {}", vrspace_assets::crate_info());
            println!("session: {}", vrspace_session::crate_info());
            println!("tools: {}", vrspace_tools::crate_info());
        }
        Commands::Run { frames, manifest } => {
            let manifest = match manifest {
                Some(path) => EnvironmentManifest::load(&path)?,
                None => EnvironmentManifest::demo(),
            };
            let config = EnvironmentConfig::default();
            println!(
                "Running '{}' ({:#018x}) for {frames} frames",
                manifest.name,
                manifest.asset_id().0
            );

            let runtime = ScriptedXr::from_frames(demo_script());
            let mut session =
                pollster::block_on(Session::bootstrap(runtime, &manifest, &config))?;
            session.run(frames);

            println!("{}", SceneInspector::summary(session.scene()));
            println!(
                "Frames: {}  Teleport floors: {}",
                session.frame(),
                session.teleportation().floor_count()
            );
            match session.grab_state() {
                GrabState::Empty => println!("Grab slot: empty"),
                GrabState::Holding(id) => {
                    match SceneInspector::inspect_node(session.scene(), id) {
                        Some(info) => println!("Grab slot: holding {info}"),
                        None => println!("Grab slot: holding {id}"),
                    }
                }
            }
        }
        Commands::Validate { path } => {
            let manifest = EnvironmentManifest::load(&path)?;
            let config = EnvironmentConfig::default();

            let mut scene = vrspace_scene::SceneGraph::new();
            let env = vrspace_assets::instantiate(&manifest, &config, &mut scene)?;

            println!("Manifest '{}' ({:#018x})", manifest.name, env.id.0);
            println!(
                "Meshes: {}  Floors: {}  Props: {}  Groups: {}",
                manifest.meshes.len(),
                env.floors.len(),
                env.props.len(),
                env.groups.len()
            );
            for id in &env.props {
                if let Some(info) = SceneInspector::inspect_node(&scene, *id) {
                    println!("  grabbable {info}");
                }
            }
        }
    }

    Ok(())
}

/// The scripted controller performance the headless demo replays: the left
/// hand exercises the logging-only controls, then the right hand picks up
/// the demo sphere, carries it, and drops it.
fn demo_script() -> Vec<FrameInput> {
    let sphere_grip = Transform::from_position(Vec3::new(0.6, 1.1, -0.4));
    let left_idle = ControllerInput::idle().at_grip(Transform::from_position(Vec3::new(
        -0.3, 1.2, -0.2,
    )));
    let right_idle = ControllerInput::idle().at_grip(sphere_grip);

    let mut frames = Vec::new();

    // A few frames before any controller is tracked.
    for _ in 0..3 {
        frames.push(FrameInput::empty());
    }

    // Left controller: trigger, face buttons, thumbstick.
    let left = |input: ControllerInput| FrameInput::empty().with_hand(Hand::Left, input);
    frames.push(left(left_idle));
    frames.push(left(left_idle.with_button(ButtonId::Trigger, true)));
    frames.push(left(left_idle));
    frames.push(left(left_idle.with_button(ButtonId::Primary, true)));
    frames.push(left(left_idle));
    frames.push(left(left_idle.with_thumbstick(0.8, 0.0)));
    frames.push(left(left_idle.with_thumbstick(0.0, 0.9)));
    frames.push(left(left_idle));

    // Both hands tracked; the right hand grabs the sphere and carries it.
    let both = |right: ControllerInput| {
        FrameInput::empty()
            .with_hand(Hand::Left, left_idle)
            .with_hand(Hand::Right, right)
    };
    frames.push(both(right_idle));
    frames.push(both(right_idle.with_button(ButtonId::Squeeze, true)));
    for step in 1..=5 {
        let carried = Transform::from_position(
            sphere_grip.position + Vec3::new(0.0, 0.1, 0.2) * step as f32,
        );
        frames.push(both(
            ControllerInput::idle()
                .at_grip(carried)
                .with_button(ButtonId::Squeeze, true),
        ));
    }
    frames.push(both(ControllerInput::idle().at_grip(
        Transform::from_position(sphere_grip.position + Vec3::new(0.0, 0.5, 1.0)),
    )));

    // Right face buttons, then everything disconnects.
    frames.push(both(right_idle.with_button(ButtonId::Primary, true)));
    frames.push(both(right_idle));
    frames.push(FrameInput::empty());

    frames
}
