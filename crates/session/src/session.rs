use vrspace_assets::{AssetError, Environment, EnvironmentConfig, EnvironmentManifest};
use vrspace_common::{Hand, NodeId, Transform};
use vrspace_input::{log_event, ControlEvent, InputRig};
use vrspace_interaction::{GrabController, GrabState};
use vrspace_scene::{SceneError, SceneGraph};
use vrspace_xr::{Teleportation, XrCamera, XrError, XrRuntime};

/// Errors from session bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Xr(#[from] XrError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// The running VR session: scene truth, input tracking, and the grab
/// interaction, driven by an XR runtime behind the trait seam.
///
/// Grip nodes for both hands live in the scene graph and mirror the
/// runtime's grip poses each frame, so a held object follows controller
/// motion through ordinary parent-chain composition.
pub struct Session<R: XrRuntime> {
    runtime: R,
    scene: SceneGraph,
    rig: InputRig,
    grab: GrabController,
    teleportation: Teleportation,
    camera: XrCamera,
    environment: Environment,
    grips: [NodeId; Hand::COUNT],
    frame: u64,
}

impl<R: XrRuntime> Session<R> {
    /// Perform the one-time setup: instantiate the environment, register
    /// teleport floors, collect the grabbable props, create the grip
    /// nodes, and start the XR session. Must complete before `tick`.
    ///
    /// The grab interaction is wired to the right hand only, matching the
    /// sample behavior; the left hand is logging-only.
    pub async fn bootstrap(
        mut runtime: R,
        manifest: &EnvironmentManifest,
        config: &EnvironmentConfig,
    ) -> Result<Self, SessionError> {
        let mut scene = SceneGraph::new();
        let environment = vrspace_assets::instantiate(manifest, config, &mut scene)?;

        let mut teleportation = Teleportation::new();
        for &floor in &environment.floors {
            teleportation.add_floor_mesh(floor);
        }

        let grips = [
            scene.add_node("left_grip", Transform::default()),
            scene.add_node("right_grip", Transform::default()),
        ];
        let grab = GrabController::new(
            Hand::Right,
            grips[Hand::Right.index()],
            environment.props.clone(),
        );

        let info = runtime.start_session().await?;
        tracing::debug!(
            "session ready: {} nodes, {} floors, {} grabbables",
            scene.node_count(),
            teleportation.floor_count(),
            grab.grabbables().len()
        );

        Ok(Self {
            runtime,
            scene,
            rig: InputRig::new(),
            grab,
            teleportation,
            camera: info.camera,
            environment,
            grips,
            frame: 0,
        })
    }

    /// Run one frame: poll the runtime, mirror grip poses into the scene,
    /// then drain the change events through logging and the grab
    /// controller. Returns the frame's events for callers that want them.
    pub fn tick(&mut self) -> Vec<ControlEvent> {
        let frame_input = self.runtime.poll_frame();

        // Grip poses first: a press edge this frame intersects against
        // this frame's pose.
        for hand in Hand::BOTH {
            if let Some(input) = frame_input.get(hand) {
                let grip = self.grips[hand.index()];
                let current = self.scene.get(grip).map(|n| n.local);
                if current != Some(input.grip) {
                    let _ = self.scene.set_local_transform(grip, input.grip);
                }
            }
        }

        let events = self.rig.poll(&frame_input);
        for event in &events {
            log_event(event);
            self.grab.handle(event, &mut self.scene);
        }

        self.frame += 1;
        events
    }

    /// Run a fixed number of frames.
    pub fn run(&mut self, frames: u64) {
        for _ in 0..frames {
            self.tick();
        }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn grab_state(&self) -> GrabState {
        self.grab.state()
    }

    pub fn teleportation(&self) -> &Teleportation {
        &self.teleportation
    }

    pub fn camera(&self) -> &XrCamera {
        &self.camera
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The scene node mirroring one hand's grip pose.
    pub fn grip(&self, hand: Hand) -> NodeId {
        self.grips[hand.index()]
    }

    /// Frames processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
