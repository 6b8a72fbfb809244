// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };

/// Orthonormal basis; `n` is the local +z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub s: Vector3f,
    pub t: Vector3f,
    pub n: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            s: Vector3f::new(1.0, 0.0, 0.0),
            t: Vector3f::new(0.0, 1.0, 0.0),
            n: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    pub fn new(s: Vector3f, t: Vector3f, n: Vector3f) -> Frame {
        Frame { s, t, n }
    }

    /// Builds a tangent basis around a unit normal.
    pub fn from_normal(n: &Vector3f) -> Frame {
        let up = if n.z.abs() < 0.999 {
            Vector3f::new(0.0, 0.0, 1.0)
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let s = n.cross(&up).normalize();
        let t = n.cross(&s).normalize();
        Frame { s, t, n: *n }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.s * v.x + self.t * v.y + self.n * v.z
    }

    pub fn cos_theta(v: &Vector3f) -> Float {
        v.z
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use crate::math::constants::Vector3f;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_is_orthonormal() {
        let n = Vector3f::new(0.3, -0.5, 0.8).normalize();
        let frame = Frame::from_normal(&n);
        assert_relative_eq!(frame.s.dot(&frame.t), 0.0, epsilon = 1e-6);
        assert_relative_eq!(frame.s.dot(&frame.n), 0.0, epsilon = 1e-6);
        assert_relative_eq!(frame.t.dot(&frame.n), 0.0, epsilon = 1e-6);
        assert_relative_eq!(frame.s.cross(&frame.t), frame.n, epsilon = 1e-5);
    }

    #[test]
    fn test_local_world_round_trip() {
        let frame = Frame::from_normal(&Vector3f::new(0.0, 0.0, -1.0));
        let v = Vector3f::new(0.2, 0.4, -0.1);
        assert_relative_eq!(frame.to_world(&frame.to_local(&v)), v, epsilon = 1e-6);
        assert_relative_eq!(Frame::cos_theta(&frame.to_local(&frame.n)), 1.0, epsilon = 1e-6);
    }
}
