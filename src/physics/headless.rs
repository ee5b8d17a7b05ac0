//! Headless reference simulator
//!
//! A small world that honours the [`PhysicsWorld`] contract:
//! dynamic circles move and bounce off static shapes, and pairs are reported
//! once when they start touching. Used by the native binary and by tests.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

use super::contact::{Contact, circle_circle_contact, circle_rect_contact, reflect_velocity};
use super::{BodyDesc, BodyId, BodyRole, CollisionPair, PairSide, PhysicsWorld, Shape};
use crate::consts::BASE_STEP_MS;

#[derive(Debug, Clone)]
struct Body {
    desc: BodyDesc,
    pos: Vec2,
    /// Units per base step
    vel: Vec2,
}

/// Minimal rigid-body world with stable iteration order (by body id)
#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    bodies: BTreeMap<BodyId, Body>,
    /// Pairs touching at the end of the previous step (lower id first)
    touching: BTreeSet<(BodyId, BodyId)>,
    /// Acceleration applied to dynamic bodies (units per base step squared)
    gravity: Vec2,
    next_id: u32,
}

impl Default for HeadlessWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessWorld {
    /// Create an empty world without gravity
    pub fn new() -> Self {
        Self {
            bodies: BTreeMap::new(),
            touching: BTreeSet::new(),
            gravity: Vec2::ZERO,
            next_id: 1,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of bodies carrying the given role
    pub fn count_role(&self, role: BodyRole) -> usize {
        self.bodies.values().filter(|b| b.desc.role == role).count()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(&id)
    }

    fn contact_between(a: &Body, b: &Body) -> Option<Contact> {
        let Shape::Circle { radius } = a.desc.shape else {
            return None;
        };
        match b.desc.shape {
            Shape::Rect { width, height } => {
                circle_rect_contact(a.pos, radius, b.pos, Vec2::new(width, height))
            }
            Shape::Circle { radius: other } => circle_circle_contact(a.pos, radius, b.pos, other),
        }
    }
}

impl PhysicsWorld for HeadlessWorld {
    fn add_body(&mut self, desc: BodyDesc, position: Vec2) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(
            id,
            Body {
                desc,
                pos: position,
                vel: Vec2::ZERO,
            },
        );
        id
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        let removed = self.bodies.remove(&id).is_some();
        if removed {
            self.touching.retain(|&(a, b)| a != id && b != id);
        }
        removed
    }

    fn role(&self, id: BodyId) -> Option<BodyRole> {
        self.bodies.get(&id).map(|b| b.desc.role)
    }

    fn position(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.pos)
    }

    fn set_position(&mut self, id: BodyId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = position;
        }
    }

    fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.vel)
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.vel = velocity;
        }
    }

    fn step(&mut self, dt_ms: f32) -> Vec<CollisionPair> {
        let scale = dt_ms / BASE_STEP_MS;

        // Integrate dynamic bodies
        for body in self.bodies.values_mut() {
            if body.desc.is_static {
                continue;
            }
            body.vel += self.gravity * scale;
            body.vel *= (1.0 - body.desc.material.friction_air).powf(scale);
            body.pos += body.vel * scale;
        }

        // Dynamic circles against everything else
        let dynamic: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|(_, b)| !b.desc.is_static)
            .map(|(id, _)| *id)
            .collect();

        let mut now_touching = BTreeSet::new();
        let mut started = Vec::new();

        for id in dynamic {
            let others: Vec<BodyId> = self.bodies.keys().copied().filter(|o| *o != id).collect();
            for other in others {
                let (Some(body), Some(other_body)) = (self.bodies.get(&id), self.bodies.get(&other))
                else {
                    continue;
                };
                let Some(contact) = Self::contact_between(body, other_body) else {
                    continue;
                };

                let restitution = body
                    .desc
                    .material
                    .restitution
                    .max(other_body.desc.material.restitution);
                let pair = CollisionPair {
                    a: PairSide {
                        body: id,
                        role: body.desc.role,
                    },
                    b: PairSide {
                        body: other,
                        role: other_body.desc.role,
                    },
                };

                if let Some(body) = self.bodies.get_mut(&id) {
                    body.vel = reflect_velocity(body.vel, contact.normal, restitution);
                    body.pos += contact.normal * contact.penetration;
                }

                let key = if id < other { (id, other) } else { (other, id) };
                if now_touching.insert(key) && !self.touching.contains(&key) {
                    started.push(pair);
                }
            }
        }

        self.touching = now_touching;
        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::physics::Material;

    fn bouncy() -> Material {
        Material {
            restitution: 1.0,
            friction: 0.0,
            friction_air: 0.0,
        }
    }

    #[test]
    fn test_ball_moves_per_base_step() {
        let mut world = HeadlessWorld::new();
        let ball = world.add_body(
            BodyDesc::circle(BodyRole::Ball, 5.0, bouncy(), colors::BALL),
            Vec2::new(100.0, 100.0),
        );
        world.set_velocity(ball, Vec2::new(3.0, -2.0));
        world.step(BASE_STEP_MS);
        let pos = world.position(ball).unwrap();
        assert!((pos - Vec2::new(103.0, 98.0)).length() < 1e-4);
    }

    #[test]
    fn test_bounce_reports_pair_once() {
        let mut world = HeadlessWorld::new();
        let ball = world.add_body(
            BodyDesc::circle(BodyRole::Ball, 5.0, bouncy(), colors::BALL),
            Vec2::new(0.0, 0.0),
        );
        let brick = world.add_body(
            BodyDesc::rect(BodyRole::Brick, 40.0, 10.0, colors::for_row(0)),
            Vec2::new(0.0, -12.0),
        );
        world.set_velocity(ball, Vec2::new(0.0, -3.0));

        let pairs = world.step(BASE_STEP_MS);
        assert_eq!(pairs.len(), 1);
        assert_eq!(
            pairs[0].match_roles(BodyRole::Ball, BodyRole::Brick),
            Some((ball, brick))
        );
        // Reflected downward (away from the brick)
        assert!(world.velocity(ball).unwrap().y > 0.0);

        let pairs = world.step(BASE_STEP_MS);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_over_elastic_material_gains_speed() {
        let mut world = HeadlessWorld::new();
        let material = Material {
            restitution: 1.2,
            ..bouncy()
        };
        let ball = world.add_body(
            BodyDesc::circle(BodyRole::Ball, 5.0, material, colors::BALL),
            Vec2::new(0.0, 0.0),
        );
        world.add_body(
            BodyDesc::rect(BodyRole::Wall, 10.0, 100.0, colors::WALL),
            Vec2::new(12.0, 0.0),
        );
        world.set_velocity(ball, Vec2::new(10.0, 0.0));
        world.step(BASE_STEP_MS);
        let vel = world.velocity(ball).unwrap();
        assert!((vel.x + 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_remove_body() {
        let mut world = HeadlessWorld::new();
        let id = world.add_body(
            BodyDesc::rect(BodyRole::Brick, 10.0, 10.0, colors::for_row(1)),
            Vec2::ZERO,
        );
        assert!(world.remove_body(id));
        assert!(!world.remove_body(id));
        assert_eq!(world.position(id), None);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_static_bodies_do_not_move() {
        let mut world = HeadlessWorld::new().with_gravity(Vec2::new(0.0, 1.0));
        let paddle = world.add_body(
            BodyDesc::rect(BodyRole::Paddle, 100.0, 10.0, colors::PADDLE),
            Vec2::new(50.0, 50.0),
        );
        world.set_velocity(paddle, Vec2::new(5.0, 5.0));
        world.step(BASE_STEP_MS);
        assert_eq!(world.position(paddle), Some(Vec2::new(50.0, 50.0)));
    }
}
