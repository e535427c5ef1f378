//! End-to-end checks of the rigs against a world that records what it is
//! asked to do.

use approx::assert_relative_eq;
use glam::Vec2;
use swingset::world::{Body, BodyHandle, Constraint, ConstraintHandle, Shape, ShapeHandle};
use swingset::{
    Assembly, Config, JointKind, LimbStacking, SimulationWorld, Space, Stickman, StickmanConfig,
    Swing, SwingConfig,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Force(BodyHandle, Vec2),
    Integrate,
}

/// Forwards to a `Space` and logs forces and steps in call order.
#[derive(Default)]
struct RecordingWorld {
    inner: Space,
    events: Vec<Event>,
}

impl RecordingWorld {
    fn forces(&self) -> Vec<(BodyHandle, Vec2)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Force(body, force) => Some((body, force)),
                Event::Integrate => None,
            })
            .collect()
    }
}

impl SimulationWorld for RecordingWorld {
    fn add_body(&mut self, body: Body) -> BodyHandle {
        self.inner.add_body(body)
    }

    fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.inner.remove_body(handle)
    }

    fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.inner.body(handle)
    }

    fn body_count(&self) -> usize {
        self.inner.body_count()
    }

    fn add_shape(&mut self, shape: Shape) -> ShapeHandle {
        self.inner.add_shape(shape)
    }

    fn remove_shape(&mut self, handle: ShapeHandle) -> Option<Shape> {
        self.inner.remove_shape(handle)
    }

    fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.inner.shape(handle)
    }

    fn shape_count(&self) -> usize {
        self.inner.shape_count()
    }

    fn add_constraint(&mut self, constraint: Constraint) -> ConstraintHandle {
        self.inner.add_constraint(constraint)
    }

    fn remove_constraint(&mut self, handle: ConstraintHandle) -> Option<Constraint> {
        self.inner.remove_constraint(handle)
    }

    fn constraint(&self, handle: ConstraintHandle) -> Option<&Constraint> {
        self.inner.constraint(handle)
    }

    fn constraint_count(&self) -> usize {
        self.inner.constraint_count()
    }

    fn apply_force_at_point(&mut self, body: BodyHandle, force: Vec2, point: Vec2) -> bool {
        let applied = self.inner.apply_force_at_point(body, force, point);
        if applied {
            self.events.push(Event::Force(body, force));
        }
        applied
    }

    fn integrate(&mut self, dt: f32) {
        self.inner.integrate(dt);
        self.events.push(Event::Integrate);
    }
}

fn counts(world: &impl SimulationWorld) -> (usize, usize, usize) {
    (world.body_count(), world.shape_count(), world.constraint_count())
}

fn hanging_swing(num_links: u32) -> SwingConfig {
    SwingConfig {
        start_angle: 180.0,
        num_links,
        link_length: 15.0,
        ..SwingConfig::default()
    }
}

#[test]
fn every_segment_is_pushed_once_before_the_step() {
    let mut world = RecordingWorld::default();
    let swing = Swing::create(&hanging_swing(6), &mut world, Vec2::ZERO, 1).unwrap();
    let stickman =
        Stickman::create(&StickmanConfig::default(), &mut world, Vec2::new(100.0, 500.0), 2)
            .unwrap();

    swing.update(&mut world).unwrap();
    stickman.update(&mut world).unwrap();
    world.integrate(1.0 / 60.0);

    assert_eq!(world.events.len(), 6 + 8 + 1);
    assert_eq!(world.events.last(), Some(&Event::Integrate));

    let mut pushed: Vec<BodyHandle> = world.forces().iter().map(|(b, _)| *b).collect();
    pushed.sort();
    pushed.dedup();
    assert_eq!(pushed.len(), 14);
}

#[test]
fn drag_opposes_motion_and_grows_with_speed_squared() {
    let mut world = RecordingWorld::default();
    let swing = Swing::create(&hanging_swing(2), &mut world, Vec2::ZERO, 1).unwrap();
    let seat = swing.seat().body();

    let velocity = Vec2::new(30.0, -40.0);
    world.inner.body_mut(seat).unwrap().velocity = velocity;
    swing.update(&mut world).unwrap();
    world.inner.body_mut(seat).unwrap().velocity = velocity * 2.0;
    swing.update(&mut world).unwrap();

    let seat_forces: Vec<Vec2> = world
        .forces()
        .into_iter()
        .filter(|(b, _)| *b == seat)
        .map(|(_, f)| f)
        .collect();
    assert_eq!(seat_forces.len(), 2);

    let (slow, fast) = (seat_forces[0], seat_forces[1]);
    assert_relative_eq!(slow.normalize().dot(velocity.normalize()), -1.0, epsilon = 1e-5);
    assert_relative_eq!(fast.length() / slow.length(), 4.0, epsilon = 1e-4);

    let area = std::f32::consts::PI * 2.0 * 2.0;
    let k = 0.45 * 0.025 * area / 2.0;
    assert_relative_eq!(slow.length(), k * velocity.length_squared(), epsilon = 1e-4);
}

#[test]
fn resting_rig_feels_no_drag() {
    let mut world = RecordingWorld::default();
    let stickman =
        Stickman::create(&StickmanConfig::default(), &mut world, Vec2::ZERO, 1).unwrap();

    stickman.update(&mut world).unwrap();

    assert_eq!(world.forces().len(), 8);
    assert!(world.forces().iter().all(|(_, f)| *f == Vec2::ZERO));
}

#[test]
fn swing_links_are_pinned_in_order() {
    let mut world = Space::new();
    let swing = Swing::create(&hanging_swing(7), &mut world, Vec2::new(10.0, 20.0), 4).unwrap();

    assert_eq!(swing.num_links(), 7);
    assert_eq!(swing.joints().len(), 6);
    for (i, pair) in swing.links().windows(2).enumerate() {
        let joint = &swing.joints().joints()[i];
        assert!(joint.connects(pair[0].body(), pair[1].body()));
        assert_eq!(joint.kind(), JointKind::Pin);
    }
    assert!(world.body(swing.top_link().body()).unwrap().is_static());
}

#[test]
fn swing_removal_leaves_an_empty_world() {
    let mut world = Space::new();
    let swing = Swing::create(&hanging_swing(10), &mut world, Vec2::ZERO, 1).unwrap();
    let handles: Vec<_> = swing.links().iter().map(|l| (l.body(), l.shape())).collect();

    swing.remove(&mut world);

    assert_eq!(counts(&world), (0, 0, 0));
    for (body, shape) in handles {
        assert!(!world.contains_body(body));
        assert!(!world.contains_shape(shape));
    }
}

#[test]
fn stickman_round_trip_restores_counts() {
    let mut world = Space::new();
    let bystander = Swing::create(&hanging_swing(3), &mut world, Vec2::ZERO, 1).unwrap();
    let before = counts(&world);

    let mut config = StickmanConfig::default();
    config.joint_kind = JointKind::LimitedRotary {
        motor_rate: Some(1.0),
    };
    let stickman = Stickman::create(&config, &mut world, Vec2::new(100.0, 500.0), 2).unwrap();
    assert_eq!(counts(&world), (before.0 + 8, before.1 + 8, before.2 + 7 * 3));

    stickman.remove(&mut world);
    assert_eq!(counts(&world), before);
    assert!(bystander.is_registered(&world));
}

#[test]
fn stacking_modes_differ_only_in_the_lower_body() {
    let mut world = Space::new();
    let stepped = StickmanConfig::default();
    let hanging = StickmanConfig {
        stacking: LimbStacking::Hanging,
        ..stepped
    };

    let a = Stickman::create(&stepped, &mut world, Vec2::new(100.0, 500.0), 1).unwrap();
    let b = Stickman::create(&hanging, &mut world, Vec2::new(100.0, 500.0), 2).unwrap();

    let pos = |s: &Stickman| s.lower_leg().position(&world).unwrap();
    assert_eq!(pos(&a), Vec2::new(100.0, 480.0));
    assert_eq!(pos(&b), Vec2::new(100.0, 420.0));
    assert_eq!(
        a.foot().position(&world).unwrap(),
        b.foot().position(&world).unwrap()
    );
}

#[test]
fn shipped_config_matches_defaults() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/config");
    let config = Config::load_dir(dir).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn swing_keeps_its_links_together_under_gravity() {
    let mut world = Space::new().with_gravity(Vec2::new(0.0, 900.0));
    let config = SwingConfig::default();
    let swing = Swing::create(&config, &mut world, Vec2::new(400.0, 50.0), 1).unwrap();

    for _ in 0..120 {
        swing.update(&mut world).unwrap();
        world.integrate(1.0 / 60.0);
    }

    for pair in swing.links().windows(2) {
        let gap = pair[0].position(&world).unwrap() - pair[1].position(&world).unwrap();
        assert_relative_eq!(gap.length(), config.link_length, epsilon = 1.0);
    }
    assert!(swing.seat().position(&world).unwrap().y > 50.0);
}
