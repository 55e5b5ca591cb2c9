//! Math utilities and types
//!
//! Provides the 2D vector and transform types used by the scene hierarchy.

use std::f32::consts::PI;

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Euclidean distance between two points
pub fn distance(p1: &Vec2, p2: &Vec2) -> f32 {
    (p1 - p2).norm()
}

/// Rotate a vector about the origin by an angle given in degrees
///
/// Counter-clockwise for positive angles:
/// `x' = x·cosθ − y·sinθ`, `y' = x·sinθ + y·cosθ`.
pub fn rotate_vector(angle_degrees: f32, v: &Vec2) -> Vec2 {
    let radians = angle_degrees * PI / 180.0;
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Render a vector as `(x,y)`
pub fn format_vec2(v: &Vec2) -> String {
    format!("({},{})", v.x, v.y)
}

/// Local-space transform of a scene node: position, rotation in degrees, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Offset relative to the parent
    pub position: Vec2,

    /// Rotation in degrees
    pub rotation: f32,

    /// Per-axis scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from all three fields
    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_three_four_five() {
        let p1 = Vec2::new(3.0, 0.0);
        let p2 = Vec2::new(0.0, 4.0);
        assert_eq!(distance(&p1, &p2), 5.0);
        assert_eq!(distance(&p2, &p1), 5.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Vec2::new(-2.5, 7.0);
        assert_eq!(distance(&p, &p), 0.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = rotate_vector(90.0, &Vec2::new(1.0, 0.0));
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let v = Vec2::new(2.0, -3.0);
        let rotated = rotate_vector(360.0, &v);
        assert_relative_eq!(rotated, v, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_thirty_degrees() {
        let rotated = rotate_vector(30.0, &Vec2::new(2.0, 0.0));
        assert_relative_eq!(rotated.x, 3.0_f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        let rotated = rotate_vector(137.0, &v);
        assert_relative_eq!(rotated.norm(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_vector_arithmetic() {
        let mut a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));

        a += b;
        assert_eq!(a, Vec2::new(1.5, 1.0));
        a -= b;
        assert_eq!(a, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_format_vec2() {
        assert_eq!(format_vec2(&Vec2::new(1.5, -2.0)), "(1.5,-2)");
    }

    #[test]
    fn test_transform_identity() {
        let t = Transform2D::identity();
        assert_eq!(t.position, Vec2::zeros());
        assert_eq!(t.rotation, 0.0);
        assert_eq!(t.scale, Vec2::new(1.0, 1.0));
        assert_eq!(t, Transform2D::default());
    }

    #[test]
    fn test_transform_builders() {
        let t = Transform2D::from_position(Vec2::new(4.0, 5.0))
            .with_rotation(45.0)
            .with_scale(Vec2::new(2.0, 2.0));
        assert_eq!(t, Transform2D::new(Vec2::new(4.0, 5.0), 45.0, Vec2::new(2.0, 2.0)));
    }
}
