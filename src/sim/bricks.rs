//! Brick grid layout and lifetime

use std::collections::HashMap;

use glam::Vec2;

use crate::config::GameConfig;
use crate::physics::{BodyDesc, BodyId, BodyRole, PhysicsWorld};
use crate::{Rgba, colors};

/// Grid geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickLayout {
    pub rows: usize,
    pub cols: usize,
    pub field_width: f32,
    pub gap: f32,
    pub brick_height: f32,
    pub top_offset: f32,
}

impl BrickLayout {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            rows: config.bricks.rows,
            cols: config.bricks.cols,
            field_width: config.field.width,
            gap: config.bricks.gap,
            brick_height: config.bricks.height,
            top_offset: config.bricks.top_offset,
        }
    }

    pub fn brick_width(&self) -> f32 {
        let cols = self.cols as f32;
        (self.field_width - self.gap * (cols + 1.0)) / cols
    }

    pub fn brick_size(&self) -> Vec2 {
        Vec2::new(self.brick_width(), self.brick_height)
    }

    /// Center of the brick at (`row`, `col`); row 0 is the top row
    pub fn brick_center(&self, row: usize, col: usize) -> Vec2 {
        let size = self.brick_size();
        Vec2::new(
            self.gap + col as f32 * (size.x + self.gap) + size.x / 2.0,
            self.top_offset + row as f32 * (size.y + self.gap) + size.y / 2.0,
        )
    }
}

/// A single brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub color: Rgba,
    pub alive: bool,
    pub body: BodyId,
    pub position: Vec2,
    pub size: Vec2,
}

/// The grid of bricks, in row-major order
#[derive(Debug, Clone, Default)]
pub struct BrickField {
    bricks: Vec<Brick>,
    by_body: HashMap<BodyId, usize>,
    remaining: usize,
    rows: usize,
}

impl BrickField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out a full grid of live bricks, replacing any previous one
    pub fn generate(&mut self, world: &mut dyn PhysicsWorld, layout: &BrickLayout) {
        self.clear(world);

        let size = layout.brick_size();
        self.bricks.reserve(layout.rows * layout.cols);
        for row in 0..layout.rows {
            let color = colors::for_row(row);
            for col in 0..layout.cols {
                let position = layout.brick_center(row, col);
                let body = world.add_body(BodyDesc::rect(BodyRole::Brick, size.x, size.y, color), position);
                self.by_body.insert(body, self.bricks.len());
                self.bricks.push(Brick {
                    row,
                    col,
                    color,
                    alive: true,
                    body,
                    position,
                    size,
                });
            }
        }
        self.rows = layout.rows;
        self.remaining = self.bricks.len();
        log::debug!("Generated {}x{} brick grid", layout.rows, layout.cols);
    }

    /// The live brick backed by `body`, if any
    pub fn alive_by_body(&self, body: BodyId) -> Option<&Brick> {
        self.by_body
            .get(&body)
            .and_then(|&i| self.bricks.get(i))
            .filter(|b| b.alive)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.row == row && b.col == col)
    }

    /// Destroy the brick backed by `body`. Returns `None` if it is already gone.
    pub fn remove(&mut self, world: &mut dyn PhysicsWorld, body: BodyId) -> Option<Brick> {
        let &index = self.by_body.get(&body)?;
        let brick = self.bricks.get_mut(index)?;
        if !brick.alive {
            return None;
        }
        world.remove_body(brick.body);
        brick.alive = false;
        self.remaining -= 1;
        Some(*brick)
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining
    }

    pub fn total_rows(&self) -> usize {
        self.rows
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Remove all remaining brick bodies and empty the field
    pub fn clear(&mut self, world: &mut dyn PhysicsWorld) {
        for brick in self.bricks.iter().filter(|b| b.alive) {
            world.remove_body(brick.body);
        }
        self.bricks.clear();
        self.by_body.clear();
        self.remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::HeadlessWorld;

    fn field() -> (HeadlessWorld, BrickField, BrickLayout) {
        let mut world = HeadlessWorld::new();
        let layout = BrickLayout::from_config(&GameConfig::default());
        let mut bricks = BrickField::new();
        bricks.generate(&mut world, &layout);
        (world, bricks, layout)
    }

    #[test]
    fn test_generate_full_grid() {
        let (world, bricks, _) = field();
        assert_eq!(bricks.bricks().len(), 48);
        assert_eq!(bricks.remaining_count(), 48);
        assert_eq!(bricks.total_rows(), 6);
        assert_eq!(world.count_role(BodyRole::Brick), 48);
        assert!(bricks.bricks().iter().all(|b| b.alive));
    }

    #[test]
    fn test_layout_positions() {
        let (_, bricks, layout) = field();
        let first = bricks.get(0, 0).unwrap();
        let w = layout.brick_width();
        assert!((first.position.x - (10.0 + w / 2.0)).abs() < 1e-4);
        assert!((first.position.y - 72.5).abs() < 1e-4);

        let last = bricks.get(5, 7).unwrap();
        // Right edge of the last column leaves exactly one gap to the wall
        assert!((last.position.x + w / 2.0 - 790.0).abs() < 1e-3);
        assert!((last.position.y - (60.0 + 5.0 * 35.0 + 12.5)).abs() < 1e-4);
    }

    #[test]
    fn test_colors_keyed_by_row() {
        let (_, bricks, _) = field();
        for brick in bricks.bricks() {
            assert_eq!(brick.color, colors::for_row(brick.row));
        }
        assert_ne!(bricks.get(0, 0).unwrap().color, bricks.get(1, 0).unwrap().color);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut world, mut bricks, _) = field();
        let body = bricks.get(2, 3).unwrap().body;
        let removed = bricks.remove(&mut world, body).unwrap();
        assert_eq!((removed.row, removed.col), (2, 3));
        assert!(!world.contains(body));
        assert_eq!(bricks.remaining_count(), 47);
        assert!(!bricks.get(2, 3).unwrap().alive);

        assert!(bricks.remove(&mut world, body).is_none());
        assert_eq!(bricks.remaining_count(), 47);
        assert!(bricks.alive_by_body(body).is_none());
    }

    #[test]
    fn test_remove_unknown_body() {
        let (mut world, mut bricks, _) = field();
        assert!(bricks.remove(&mut world, BodyId(9999)).is_none());
        assert_eq!(bricks.remaining_count(), 48);
    }

    #[test]
    fn test_remaining_matches_alive_count() {
        let (mut world, mut bricks, _) = field();
        let bodies: Vec<BodyId> = bricks.bricks().iter().step_by(3).map(|b| b.body).collect();
        for body in bodies {
            bricks.remove(&mut world, body);
        }
        let alive = bricks.bricks().iter().filter(|b| b.alive).count();
        assert_eq!(bricks.remaining_count(), alive);
        assert_eq!(world.count_role(BodyRole::Brick), alive);
    }

    #[test]
    fn test_clear_and_regenerate() {
        let (mut world, mut bricks, layout) = field();
        let body = bricks.get(0, 0).unwrap().body;
        bricks.remove(&mut world, body);
        bricks.clear(&mut world);
        assert!(bricks.is_empty());
        assert_eq!(bricks.remaining_count(), 0);
        assert_eq!(world.count_role(BodyRole::Brick), 0);

        bricks.generate(&mut world, &layout);
        assert_eq!(bricks.remaining_count(), 48);
        assert_eq!(world.count_role(BodyRole::Brick), 48);
    }
}
