//! Logical screen geometry.
//!
//! Gameplay runs in a fixed 800x600 screen space with the origin at the top-left corner
//! and y growing downwards. Bevy's world space has the origin at the screen centre and y
//! growing upwards; `to_world` is the only place the two meet.

use bevy::prelude::*;

pub const SCREEN_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// True when `rect` lies entirely outside the logical screen.
///
/// Touching an edge from the outside counts as off-screen.
#[inline]
pub fn is_off_screen(rect: Rect) -> bool {
    rect.max.x <= 0.0 || rect.min.x >= SCREEN_SIZE.x || rect.max.y <= 0.0 || rect.min.y >= SCREEN_SIZE.y
}

/// Map a screen-space point into world space.
#[inline]
pub fn to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - SCREEN_SIZE.x * 0.5, SCREEN_SIZE.y * 0.5 - point.y)
}

/// Heading in screen degrees (clockwise, 0 = +x) from `from` towards `to`.
///
/// Coincident points yield 0.
#[inline]
pub fn look_at_degrees(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

/// Screen-space rectangle of an entity: position is the top-left corner.
#[inline]
pub fn rect_at(position: Vec2, size: Vec2) -> Rect {
    Rect::from_corners(position, position + size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_screen_edges() {
        let size = Vec2::splat(48.0);
        assert!(!is_off_screen(rect_at(Vec2::new(400.0, 150.0), size)));
        assert!(is_off_screen(rect_at(Vec2::new(-48.0, 150.0), size)));
        assert!(!is_off_screen(rect_at(Vec2::new(-47.0, 150.0), size)));
        assert!(is_off_screen(rect_at(Vec2::new(800.0, 150.0), size)));
        assert!(is_off_screen(rect_at(Vec2::new(100.0, 600.0), size)));
        assert!(is_off_screen(rect_at(Vec2::new(100.0, -48.0), size)));
    }

    #[test]
    fn world_mapping_flips_y_around_centre() {
        assert_eq!(to_world(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
        assert_eq!(to_world(SCREEN_SIZE), Vec2::new(400.0, -300.0));
    }

    #[test]
    fn look_at_uses_screen_orientation() {
        let o = Vec2::new(10.0, 10.0);
        assert!((look_at_degrees(o, o + Vec2::X) - 0.0).abs() < 1e-4);
        // y grows downwards, so "below" is +90.
        assert!((look_at_degrees(o, o + Vec2::Y) - 90.0).abs() < 1e-4);
        assert!((look_at_degrees(o, o - Vec2::X).abs() - 180.0).abs() < 1e-4);
        assert_eq!(look_at_degrees(o, o), 0.0);
    }
}
