//! Contact detection and response for circles against rectangles and circles
//!
//! Rectangles are axis-aligned. That is all the playfield needs: walls,
//! paddle and bricks never rotate.

use glam::Vec2;

/// Result of a contact check
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Closest point on the other shape
    pub point: Vec2,
    /// Surface normal, pointing toward the circle center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

/// Check a circle against an axis-aligned rectangle given by center and size
pub fn circle_rect_contact(
    center: Vec2,
    radius: f32,
    rect_center: Vec2,
    rect_size: Vec2,
) -> Option<Contact> {
    let half = rect_size / 2.0;
    let min = rect_center - half;
    let max = rect_center + half;
    let closest = center.clamp(min, max);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= radius * radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        return Some(Contact {
            point: closest,
            normal: offset / dist,
            penetration: radius - dist,
        });
    }

    // Center is inside the rectangle - push out along the shallowest axis
    let to_min = center - min;
    let to_max = max - center;
    let candidates = [
        (to_min.x, Vec2::NEG_X),
        (to_max.x, Vec2::X),
        (to_min.y, Vec2::NEG_Y),
        (to_max.y, Vec2::Y),
    ];
    let (depth, normal) = candidates
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::NEG_Y));

    Some(Contact {
        point: center + normal * depth,
        normal,
        penetration: depth + radius,
    })
}

/// Check two circles against each other; normal points toward `a`
pub fn circle_circle_contact(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> Option<Contact> {
    let offset = a - b;
    let reach = a_radius + b_radius;
    let dist_sq = offset.length_squared();
    if dist_sq >= reach * reach {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > 0.0 { offset / dist } else { Vec2::NEG_Y };
    Some(Contact {
        point: b + normal * b_radius,
        normal,
        penetration: reach - dist,
    })
}

/// Reflect velocity off a surface with the given restitution.
///
/// Only the normal component is scaled: v' = v - (1 + e)(v·n)n.
/// Restitution above 1 adds energy on every bounce.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let approach = velocity.dot(normal);
    if approach >= 0.0 {
        // Already separating
        return velocity;
    }
    velocity - (1.0 + restitution) * approach * normal
}
