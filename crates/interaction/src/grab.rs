use glam::Vec3;
use vrspace_common::{Hand, NodeId};
use vrspace_input::{ButtonId, ControlEvent};
use vrspace_scene::SceneGraph;

/// Whether a node's bounding volume contains a world-space point.
///
/// The point is mapped into the node's local space first, so non-uniform
/// scale is honored. Nodes without a collider never match.
pub fn node_contains_point(scene: &SceneGraph, id: NodeId, point: Vec3) -> bool {
    let Some(node) = scene.get(id) else {
        return false;
    };
    let Some(collider) = node.collider else {
        return false;
    };
    let Some(world) = scene.world_transform(id) else {
        return false;
    };
    collider.contains_local(world.inverse_transform_point(point))
}

/// Grab slot contents for one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrabState {
    #[default]
    Empty,
    Holding(NodeId),
}

/// One controller's grab-and-carry state machine.
///
/// Owns no scene data: candidates are scanned in registration order and all
/// mutation goes through the scene graph's explicit reparent operations.
/// Resolution is first-in-list, not nearest; switching to distance-based
/// selection would be a behavior change.
#[derive(Debug, Clone)]
pub struct GrabController {
    hand: Hand,
    grip: NodeId,
    grabbables: Vec<NodeId>,
    state: GrabState,
}

impl GrabController {
    /// A controller for `hand` whose grip node is `grip`, choosing among
    /// `grabbables` in the given order.
    pub fn new(hand: Hand, grip: NodeId, grabbables: Vec<NodeId>) -> Self {
        Self {
            hand,
            grip,
            grabbables,
            state: GrabState::Empty,
        }
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    /// The grip node objects are parented to while held.
    pub fn grip(&self) -> NodeId {
        self.grip
    }

    pub fn state(&self) -> GrabState {
        self.state
    }

    /// The held node, if any.
    pub fn held(&self) -> Option<NodeId> {
        match self.state {
            GrabState::Empty => None,
            GrabState::Holding(id) => Some(id),
        }
    }

    /// Candidate nodes in scan order.
    pub fn grabbables(&self) -> &[NodeId] {
        &self.grabbables
    }

    /// Route one control event. Only this hand's squeeze edges mutate the
    /// slot; everything else is ignored.
    pub fn handle(&mut self, event: &ControlEvent, scene: &mut SceneGraph) {
        let ControlEvent::Button {
            hand,
            button: ButtonId::Squeeze,
            pressed,
        } = event
        else {
            return;
        };
        if *hand != self.hand {
            return;
        }
        if *pressed {
            self.grab(scene);
        } else {
            self.release(scene);
        }
    }

    /// Press edge: pick up the first intersecting candidate, if any.
    fn grab(&mut self, scene: &mut SceneGraph) {
        if self.state != GrabState::Empty {
            return;
        }
        let Some(grip_world) = scene.world_transform(self.grip) else {
            return;
        };
        let point = grip_world.position;
        for &candidate in &self.grabbables {
            if !node_contains_point(scene, candidate, point) {
                continue;
            }
            if scene.attach(candidate, self.grip).is_ok() {
                self.state = GrabState::Holding(candidate);
                tracing::debug!("{} hand grabbed {candidate}", self.hand);
            }
            // First match ends the scan either way.
            return;
        }
    }

    /// Release edge: drop the held node back to world space.
    fn release(&mut self, scene: &mut SceneGraph) {
        let GrabState::Holding(held) = self.state else {
            return;
        };
        let _ = scene.detach(held);
        self.state = GrabState::Empty;
        tracing::debug!("{} hand released {held}", self.hand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrspace_common::Transform;
    use vrspace_scene::{Collider, SceneEvent};

    fn squeeze(hand: Hand, pressed: bool) -> ControlEvent {
        ControlEvent::Button {
            hand,
            button: ButtonId::Squeeze,
            pressed,
        }
    }

    /// Scene with a right grip at the origin plus two grabbable nodes.
    /// Returns (scene, grip, box_id, sphere_id).
    fn grab_scene(
        box_pos: Vec3,
        sphere_pos: Vec3,
    ) -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut scene = SceneGraph::new();
        let grip = scene.add_node("right_grip", Transform::default());
        let box_id = scene.add_node("box", Transform::from_position(box_pos));
        scene
            .set_collider(
                box_id,
                Collider::Box {
                    half_extents: Vec3::splat(0.5),
                },
            )
            .unwrap();
        let sphere_id = scene.add_node("sphere", Transform::from_position(sphere_pos));
        scene
            .set_collider(sphere_id, Collider::Sphere { radius: 0.5 })
            .unwrap();
        (scene, grip, box_id, sphere_id)
    }

    #[test]
    fn grab_picks_intersecting_object_and_reparents() {
        // Grip intersects only the sphere.
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);

        grab.handle(&squeeze(Hand::Right, true), &mut scene);

        assert_eq!(grab.state(), GrabState::Holding(sphere_id));
        assert_eq!(scene.parent_of(sphere_id), Some(grip));
    }

    #[test]
    fn release_returns_object_to_world() {
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(0.2, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);

        grab.handle(&squeeze(Hand::Right, true), &mut scene);
        assert_eq!(grab.held(), Some(box_id));

        grab.handle(&squeeze(Hand::Right, false), &mut scene);
        assert_eq!(grab.state(), GrabState::Empty);
        assert_eq!(scene.parent_of(box_id), None);
    }

    #[test]
    fn no_intersection_means_no_reparent_command() {
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-5.0, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);
        scene.drain_events();

        grab.handle(&squeeze(Hand::Right, true), &mut scene);

        assert_eq!(grab.state(), GrabState::Empty);
        assert!(!scene
            .events()
            .iter()
            .any(|e| matches!(e, SceneEvent::Attached { .. } | SceneEvent::Detached { .. })));
    }

    #[test]
    fn overlapping_candidates_resolve_by_registration_order() {
        // Both volumes contain the grip point; the box was registered first.
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(0.1, 0.0, 0.0), Vec3::new(-0.1, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);

        grab.handle(&squeeze(Hand::Right, true), &mut scene);

        assert_eq!(grab.held(), Some(box_id));
        assert_eq!(scene.parent_of(sphere_id), None);
    }

    #[test]
    fn press_while_holding_is_idempotent() {
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(0.1, 0.0, 0.0), Vec3::new(-0.1, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);

        grab.handle(&squeeze(Hand::Right, true), &mut scene);
        assert_eq!(grab.held(), Some(box_id));
        scene.drain_events();

        // A second press edge (synthetic; cannot arise from a single
        // controller without a release in between) must not re-scan.
        grab.handle(&squeeze(Hand::Right, true), &mut scene);
        assert_eq!(grab.held(), Some(box_id));
        assert!(scene.events().is_empty());
    }

    #[test]
    fn other_hands_and_buttons_are_ignored() {
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(0.1, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);

        grab.handle(&squeeze(Hand::Left, true), &mut scene);
        grab.handle(
            &ControlEvent::Button {
                hand: Hand::Right,
                button: ButtonId::Trigger,
                pressed: true,
            },
            &mut scene,
        );
        grab.handle(
            &ControlEvent::Axis {
                hand: Hand::Right,
                x: 1.0,
                y: 0.0,
            },
            &mut scene,
        );

        assert_eq!(grab.state(), GrabState::Empty);
    }

    #[test]
    fn release_while_empty_is_a_noop() {
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);
        scene.drain_events();

        grab.handle(&squeeze(Hand::Right, false), &mut scene);

        assert_eq!(grab.state(), GrabState::Empty);
        assert!(scene.events().is_empty());
    }

    #[test]
    fn held_object_follows_grip_motion() {
        let (mut scene, grip, box_id, sphere_id) =
            grab_scene(Vec3::new(0.1, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        let mut grab = GrabController::new(Hand::Right, grip, vec![box_id, sphere_id]);

        grab.handle(&squeeze(Hand::Right, true), &mut scene);
        let offset = scene.get(box_id).unwrap().local.position;

        scene
            .set_local_transform(grip, Transform::from_position(Vec3::new(0.0, 2.0, -1.0)))
            .unwrap();
        let world = scene.world_transform(box_id).unwrap();
        assert!(world
            .position
            .abs_diff_eq(Vec3::new(0.0, 2.0, -1.0) + offset, 1e-5));
    }

    #[test]
    fn node_without_collider_never_matches() {
        let mut scene = SceneGraph::new();
        let grip = scene.add_node("grip", Transform::default());
        let bare = scene.add_node("bare", Transform::default());
        let mut grab = GrabController::new(Hand::Right, grip, vec![bare]);

        grab.handle(&squeeze(Hand::Right, true), &mut scene);
        assert_eq!(grab.state(), GrabState::Empty);
    }
}
