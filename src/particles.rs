//! Debris bursts for destroyed bricks
//!
//! Purely visual: nothing here feeds back into the rules. Particles move in
//! base-step units, fall under a small constant gravity and fade out.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

use crate::Rgba;
use crate::config::ParticleConfig;
use crate::consts::ALPHA_EPSILON;

/// A single debris particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgba,
    /// 1.0 when spawned, gone at 0
    pub alpha: f32,
    /// Alpha lost per step
    pub decay: f32,
}

impl Particle {
    /// Advance one step. Returns false once the particle should be dropped.
    fn advance(&mut self, gravity: f32, field_height: f32) -> bool {
        self.pos += self.vel;
        self.vel.y += gravity;
        self.alpha -= self.decay;
        self.alpha > ALPHA_EPSILON && self.pos.y >= 0.0 && self.pos.y <= field_height
    }

    fn sprite(&self) -> ParticleSprite {
        let [r, g, b, a] = self.color;
        ParticleSprite {
            position: self.pos.to_array(),
            size: self.size,
            color: [r, g, b, a * self.alpha.clamp(0.0, 1.0)],
        }
    }
}

/// Draw call for one particle, laid out for direct upload as instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleSprite {
    pub position: [f32; 2],
    pub size: f32,
    /// Particle color with its current alpha folded in
    pub color: [f32; 4],
}

/// Draw calls for the live particles of the current frame
#[derive(Debug, Clone)]
pub struct Sprites<'a> {
    inner: std::slice::Iter<'a, Particle>,
}

impl Iterator for Sprites<'_> {
    type Item = ParticleSprite;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Particle::sprite)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Sprites<'_> {}

/// Live particle collection
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    settings: ParticleConfig,
    field_height: f32,
}

impl ParticleSystem {
    pub fn new(settings: ParticleConfig, field_height: f32) -> Self {
        Self {
            particles: Vec::with_capacity(settings.max_particles),
            settings,
            field_height,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spawn `count` particles at `pos` sharing `color`
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, rng: &mut R, pos: Vec2, color: Rgba, count: usize) {
        if !self.settings.enabled {
            return;
        }
        let s = &self.settings;
        let burst = (0..count)
            .map(|_| Particle {
                pos,
                vel: Vec2::new(
                    rng.random_range(-s.max_speed..=s.max_speed),
                    rng.random_range(-s.max_speed..=s.max_speed),
                ),
                size: rng.random_range(s.min_size..=s.max_size),
                color,
                alpha: 1.0,
                decay: rng.random_range(s.min_decay..=s.max_decay),
            })
            .collect::<Vec<_>>();
        self.particles.extend(burst);
        self.enforce_cap();
    }

    /// Add one particle, dropping the oldest when at capacity
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
        self.enforce_cap();
    }

    /// Drop the oldest particles beyond `max_particles` in one pass
    fn enforce_cap(&mut self) {
        let overflow = self.particles.len().saturating_sub(self.settings.max_particles);
        if overflow > 0 {
            self.particles.drain(..overflow);
        }
    }

    /// Advance every particle one frame, drop the expired ones and return
    /// the draw calls for what is left
    pub fn step(&mut self) -> Sprites<'_> {
        let gravity = self.settings.gravity;
        let field_height = self.field_height;
        self.particles.retain_mut(|p| p.advance(gravity, field_height));
        self.sprites()
    }

    /// Draw calls for the current frame without advancing
    pub fn sprites(&self) -> Sprites<'_> {
        Sprites {
            inner: self.particles.iter(),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
