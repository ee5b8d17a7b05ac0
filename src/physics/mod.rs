//! Rigid-body simulator contract
//!
//! The game rules never integrate or resolve collisions themselves. They talk
//! to a [`PhysicsWorld`] and receive events through a [`StepListener`]:
//! - body creation/removal, position and velocity access
//! - collision-start pairs tagged with each body's [`BodyRole`]
//! - a "before update" notification once per step

pub mod contact;
pub mod headless;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rgba;

pub use contact::{Contact, circle_circle_contact, circle_rect_contact, reflect_velocity};
pub use headless::HeadlessWorld;

/// Opaque handle to a body owned by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Game meaning of a body, used to classify collision pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRole {
    Ball,
    Paddle,
    Brick,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

/// Surface properties handed to the simulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub friction_air: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.1,
            friction_air: 0.01,
        }
    }
}

/// Everything the simulator needs to create a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub shape: Shape,
    pub role: BodyRole,
    pub is_static: bool,
    pub material: Material,
    pub color: Rgba,
}

impl BodyDesc {
    pub fn rect(role: BodyRole, width: f32, height: f32, color: Rgba) -> Self {
        Self {
            shape: Shape::Rect { width, height },
            role,
            is_static: true,
            material: Material::default(),
            color,
        }
    }

    pub fn circle(role: BodyRole, radius: f32, material: Material, color: Rgba) -> Self {
        Self {
            shape: Shape::Circle { radius },
            role,
            is_static: false,
            material,
            color,
        }
    }
}

/// One side of a reported collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSide {
    pub body: BodyId,
    pub role: BodyRole,
}

/// Two bodies that started touching during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: PairSide,
    pub b: PairSide,
}

impl CollisionPair {
    /// If one side has role `first` and the other `second`, return their bodies in that order
    pub fn match_roles(&self, first: BodyRole, second: BodyRole) -> Option<(BodyId, BodyId)> {
        if self.a.role == first && self.b.role == second {
            Some((self.a.body, self.b.body))
        } else if self.b.role == first && self.a.role == second {
            Some((self.b.body, self.a.body))
        } else {
            None
        }
    }
}

/// Capabilities the game consumes from a rigid-body simulator
pub trait PhysicsWorld {
    fn add_body(&mut self, desc: BodyDesc, position: Vec2) -> BodyId;

    /// Returns false if the body was already gone
    fn remove_body(&mut self, id: BodyId) -> bool;

    fn role(&self, id: BodyId) -> Option<BodyRole>;

    fn position(&self, id: BodyId) -> Option<Vec2>;

    fn set_position(&mut self, id: BodyId, position: Vec2);

    fn velocity(&self, id: BodyId) -> Option<Vec2>;

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2);

    /// Advance the simulation and report the pairs that started touching
    fn step(&mut self, dt_ms: f32) -> Vec<CollisionPair>;
}

/// Handler registered against the simulator's per-step events
pub trait StepListener {
    /// Fired once per step before the world integrates
    fn before_update(&mut self, world: &mut dyn PhysicsWorld);

    /// Fired with the pairs that started touching during the step
    fn collision_start(&mut self, world: &mut dyn PhysicsWorld, pairs: &[CollisionPair]);

    /// Fired once per step after integration and collision delivery
    fn after_update(&mut self, _world: &mut dyn PhysicsWorld) {}
}

/// Run one simulator step, delivering events to `listener`.
///
/// `before_update` always precedes integration, a step's collision pairs
/// are delivered right after it, and `after_update` closes the step.
pub fn run_step(world: &mut dyn PhysicsWorld, listener: &mut dyn StepListener, dt_ms: f32) {
    listener.before_update(world);
    let pairs = world.step(dt_ms);
    if !pairs.is_empty() {
        listener.collision_start(world, &pairs);
    }
    listener.after_update(world);
}
