//! Pointer/touch to paddle position mapping
//!
//! Only the horizontal coordinate matters. Raw coordinates are in displayed
//! pixels; the paddle lives in logical field units.

use glam::Vec2;

use crate::config::GameConfig;
use crate::physics::{BodyId, PhysicsWorld};

/// One sample of the input stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    /// Horizontal position in displayed pixels, relative to the canvas
    pub raw_x: f32,
    /// Pointer held down / finger on screen
    pub drag_active: bool,
}

/// Clamp a logical x so the paddle stays inside the field
#[inline]
pub fn clamp_paddle_x(x: f32, half_width: f32, field_width: f32) -> f32 {
    x.clamp(half_width, field_width - half_width)
}

/// Drives the paddle body from pointer/touch drags
#[derive(Debug, Clone)]
pub struct InputController {
    paddle: BodyId,
    paddle_y: f32,
    half_width: f32,
    field_width: f32,
    /// Logical field width / displayed width
    scale: f32,
    dragging: bool,
}

impl InputController {
    pub fn new(paddle: BodyId, config: &GameConfig) -> Self {
        Self {
            paddle,
            paddle_y: config.paddle_home().y,
            half_width: config.paddle.half_width(),
            field_width: config.field.width,
            scale: 1.0,
            dragging: false,
        }
    }

    pub fn paddle(&self) -> BodyId {
        self.paddle
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Update the scale after the canvas is resized
    pub fn set_display_width(&mut self, displayed_width: f32) {
        if displayed_width > 0.0 {
            self.scale = self.field_width / displayed_width;
        }
    }

    /// Logical, clamped paddle x for a raw coordinate
    pub fn target_x(&self, raw_x: f32) -> f32 {
        clamp_paddle_x(raw_x * self.scale, self.half_width, self.field_width)
    }

    /// Pointer down / touch start: begin dragging and snap the paddle
    pub fn press(&mut self, world: &mut dyn PhysicsWorld, raw_x: f32) {
        self.dragging = true;
        self.drag_to(world, raw_x);
    }

    /// Move the paddle while dragging. Returns false if no drag is active.
    pub fn drag_to(&mut self, world: &mut dyn PhysicsWorld, raw_x: f32) -> bool {
        if !self.dragging {
            return false;
        }
        let x = self.target_x(raw_x);
        world.set_position(self.paddle, Vec2::new(x, self.paddle_y));
        true
    }

    /// Pointer up / touch end
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Feed one sample of the continuous input stream
    pub fn apply(&mut self, world: &mut dyn PhysicsWorld, sample: InputSample) {
        match (self.dragging, sample.drag_active) {
            (false, true) => self.press(world, sample.raw_x),
            (true, true) => {
                self.drag_to(world, sample.raw_x);
            }
            (_, false) => self.release(),
        }
    }

    /// Put the paddle back in the middle of the field
    pub fn center_paddle(&mut self, world: &mut dyn PhysicsWorld) {
        self.dragging = false;
        world.set_position(self.paddle, Vec2::new(self.field_width / 2.0, self.paddle_y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::physics::{BodyDesc, BodyRole, HeadlessWorld};

    fn setup() -> (HeadlessWorld, InputController) {
        let config = GameConfig::default();
        let mut world = HeadlessWorld::new();
        let paddle = world.add_body(
            BodyDesc::rect(BodyRole::Paddle, 120.0, 16.0, colors::PADDLE),
            config.paddle_home(),
        );
        (world, InputController::new(paddle, &config))
    }

    fn paddle_pos(world: &HeadlessWorld, input: &InputController) -> Vec2 {
        world.position(input.paddle()).unwrap()
    }

    #[test]
    fn test_moves_only_while_dragging() {
        let (mut world, mut input) = setup();
        assert!(!input.drag_to(&mut world, 200.0));
        assert_eq!(paddle_pos(&world, &input).x, 400.0);

        input.press(&mut world, 200.0);
        assert_eq!(paddle_pos(&world, &input), Vec2::new(200.0, 560.0));
        input.release();
        input.drag_to(&mut world, 300.0);
        assert_eq!(paddle_pos(&world, &input).x, 200.0);
    }

    #[test]
    fn test_clamps_to_field() {
        let (mut world, mut input) = setup();
        input.press(&mut world, -50.0);
        assert_eq!(paddle_pos(&world, &input).x, 60.0);
        input.drag_to(&mut world, 5000.0);
        assert_eq!(paddle_pos(&world, &input).x, 740.0);
    }

    #[test]
    fn test_scales_displayed_coordinates() {
        let (mut world, mut input) = setup();
        // Canvas shown at half size
        input.set_display_width(400.0);
        input.press(&mut world, 150.0);
        assert_eq!(paddle_pos(&world, &input).x, 300.0);
        input.set_display_width(0.0);
        assert_eq!(input.target_x(150.0), 300.0);
    }

    #[test]
    fn test_sample_stream() {
        let (mut world, mut input) = setup();
        let samples = [
            InputSample { raw_x: 100.0, drag_active: false },
            InputSample { raw_x: 250.0, drag_active: true },
            InputSample { raw_x: 260.0, drag_active: true },
            InputSample { raw_x: 500.0, drag_active: false },
        ];
        let mut xs = Vec::new();
        for sample in samples {
            input.apply(&mut world, sample);
            xs.push(paddle_pos(&world, &input).x);
        }
        assert_eq!(xs, vec![400.0, 250.0, 260.0, 260.0]);
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_center_paddle() {
        let (mut world, mut input) = setup();
        input.press(&mut world, 100.0);
        input.center_paddle(&mut world);
        assert_eq!(paddle_pos(&world, &input), Vec2::new(400.0, 560.0));
        assert!(!input.is_dragging());
    }
}
