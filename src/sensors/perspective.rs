// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    near_clip: Float,
    far_clip: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize,
               near_clip: Float,
               far_clip: Float) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect: width as Float / height as Float,
            near_clip,
            far_clip,
            width,
            height,
        }
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let origin = props.get_point("origin", Vector3f::zeros())?;
        let target = props.get_point("target", Vector3f::new(0.0, 0.0, -1.0))?;
        let up = props.get_vector("up", Vector3f::new(0.0, 1.0, 0.0))?;
        let fov = props.get_float("fov", 30.0)?;
        let width = props.get_integer("width", 1280)?;
        let height = props.get_integer("height", 720)?;
        let near_clip = props.get_float("nearClip", 1e-4)?;
        let far_clip = props.get_float("farClip", 1e4)?;

        if !(fov > 0.0 && fov < 180.0) {
            return Err(Error::InvalidProperty {
                name: String::from("fov"),
                reason: format!("{} is not inside (0, 180) degrees", fov),
            });
        }
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidProperty {
                name: String::from("width/height"),
                reason: format!("film size {}x{} is empty", width, height),
            });
        }
        if !(near_clip >= 0.0 && far_clip > near_clip) {
            return Err(Error::InvalidProperty {
                name: String::from("nearClip/farClip"),
                reason: format!("clip range [{}, {}] is empty", near_clip, far_clip),
            });
        }
        let forward = target - origin;
        if forward.norm() == 0.0 || forward.cross(&up).norm() == 0.0 {
            return Err(Error::InvalidProperty {
                name: String::from("target"),
                reason: String::from("view direction is degenerate or parallel to up"),
            });
        }

        Ok(Self::new(origin, target, up, fov.to_radians(),
                     width as usize, height as usize, near_clip, far_clip))
    }
}

impl ComputationNode for PerspectiveCamera {
    fn to_string(&self) -> String {
        format!("PerspectiveCamera[origin: {:?}, forward: {:?}, {}x{}, tan_half_fov_y: {}]",
                self.origin, self.forward, self.width, self.height, self.tan_half_fov_y)
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;

        let d_camera = Vector3f::new(px, py, 1.0).normalize();
        let dir = (self.right * d_camera.x + self.up * d_camera.y + self.forward * d_camera.z).normalize();

        let inv_z = 1.0 / d_camera.z;
        let near_t = self.near_clip * inv_z;
        let far_t = self.far_clip * inv_z;
        Ray3f::new(self.origin, dir, Some(near_t), Some(far_t))
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::Property;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_perspective_camera_center_ray() {
        let origin = Vector3f::new(0.0, 0.0, 0.0);
        let target = Vector3f::new(0.0, 0.0, -1.0);
        let up = Vector3f::new(0.0, 1.0, 0.0);
        let fov_y = std::f32::consts::FRAC_PI_2;
        let cam = PerspectiveCamera::new(origin, target, up, fov_y, 4, 4, 0.0, 1e4);

        let ray = cam.sample_ray(&Vector2f::new(0.5, 0.5));
        let dir = ray.dir();

        assert_abs_diff_eq!(dir.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(dir.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_camera_corners_and_clip() {
        let cam = PerspectiveCamera::new(Vector3f::zeros(),
                                         Vector3f::new(0.0, 0.0, -1.0),
                                         Vector3f::new(0.0, 1.0, 0.0),
                                         std::f32::consts::FRAC_PI_2, 2, 1, 1.0, 10.0);

        // Top left corner looks up and to the left, at twice the vertical extent.
        let ray = cam.sample_ray(&Vector2f::new(0.0, 0.0));
        let d = ray.dir();
        assert!(d.x < 0.0 && d.y > 0.0 && d.z < 0.0);
        assert_abs_diff_eq!(d.x / d.z, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(d.y / d.z, -1.0, epsilon = 1e-5);

        // Clip planes are planes, not spheres.
        assert_abs_diff_eq!(-ray.at(ray.min_t).z, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(-ray.at(ray.max_t).z, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_perspective_camera_properties() {
        let props = PropertyList::new()
            .with("origin", Property::Point(Vector3f::new(0.0, 0.0, 5.0))).unwrap()
            .with("target", Property::Point(Vector3f::zeros())).unwrap()
            .with("width", Property::Integer(64)).unwrap()
            .with("height", Property::Integer(32)).unwrap();
        let cam = PerspectiveCamera::from_properties(&props).unwrap();
        assert_eq!(cam.resolution(), (64, 32));

        let bad = PropertyList::new().with("fov", Property::Float(-10.0)).unwrap();
        assert!(matches!(PerspectiveCamera::from_properties(&bad),
                         Err(Error::InvalidProperty { .. })));
    }
}
