// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::interaction::{ShapeIntersection, ShapeSampleRecord};
use crate::core::properties::PropertyList;
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Parallelogram `origin + u * edge0 + v * edge1` for `u, v` in `[0, 1]`.
pub struct Rectangle {
    origin: Vector3f,
    edge0: Vector3f,
    edge1: Vector3f,
    normal: Vector3f,
    // edge0 x edge1, scaled by its inverse squared length
    scaled_normal: Vector3f,
    area: Float,
    inv_area: Float,
}

impl Rectangle {
    pub fn new(origin: Vector3f, edge0: Vector3f, edge1: Vector3f) -> Result<Self> {
        let cross = edge0.cross(&edge1);
        let area = cross.norm();
        if !(area > 0.0) {
            return Err(Error::InvalidProperty {
                name: String::from("edge0/edge1"),
                reason: String::from("rectangle has zero area"),
            });
        }

        Ok(Self {
            origin,
            edge0,
            edge1,
            normal: cross / area,
            scaled_normal: cross / (area * area),
            area,
            inv_area: 1.0 / area,
        })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let origin = props.get_point("origin", Vector3f::new(-1.0, -1.0, 0.0))?;
        let edge0 = props.get_vector("edge0", Vector3f::new(2.0, 0.0, 0.0))?;
        let edge1 = props.get_vector("edge1", Vector3f::new(0.0, 2.0, 0.0))?;
        Self::new(origin, edge0, edge1)
    }

    fn intersect(&self, ray: &Ray3f) -> Option<(Float, Vector3f, Vector2f)> {
        let denom = self.normal.dot(&ray.dir());
        if denom.abs() < EPSILON * EPSILON {
            return None;
        }

        let t = self.normal.dot(&(self.origin - ray.origin())) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let p = ray.at(t);
        let op = p - self.origin;
        let u = op.cross(&self.edge1).dot(&self.scaled_normal);
        let v = self.edge0.cross(&op).dot(&self.scaled_normal);
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }

        Some((t, p, Vector2f::new(u, v)))
    }
}

impl ComputationNode for Rectangle {
    fn to_string(&self) -> String {
        format!("Rectangle[origin: {:?}, edge0: {:?}, edge1: {:?}]",
                self.origin, self.edge0, self.edge1)
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeIntersection> {
        let (t, p, uv) = self.intersect(ray)?;
        Some(ShapeIntersection { t, p, n: self.normal, uv })
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect(ray).is_some()
    }

    fn sample(&self, u: &Vector2f) -> ShapeSampleRecord {
        ShapeSampleRecord {
            p: self.origin + self.edge0 * u.x + self.edge1 * u.y,
            n: self.normal,
            pdf: self.inv_area,
        }
    }

    fn pdf(&self, _p: &Vector3f) -> Float {
        self.inv_area
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> Rectangle {
        Rectangle::new(Vector3f::zeros(),
                       Vector3f::new(1.0, 0.0, 0.0),
                       Vector3f::new(0.0, 1.0, 0.0)).unwrap()
    }

    #[test]
    fn test_rectangle_intersection() {
        let rect = unit_square();
        let ray = Ray3f::new(Vector3f::new(0.25, 0.75, 2.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let hit = rect.ray_intersection(&ray).unwrap();

        assert_abs_diff_eq!(hit.t, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(hit.uv.x, 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(hit.uv.y, 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(hit.n.z, 1.0, epsilon = 1e-6);
        assert!(rect.ray_intersection_t(&ray));
    }

    #[test]
    fn test_rectangle_misses() {
        let rect = unit_square();
        let down = Vector3f::new(0.0, 0.0, -1.0);

        let outside = Ray3f::new(Vector3f::new(1.5, 0.5, 1.0), down, None, None);
        assert!(rect.ray_intersection(&outside).is_none());

        let parallel = Ray3f::new(Vector3f::new(0.5, 0.5, 1.0), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(rect.ray_intersection(&parallel).is_none());

        let short = Ray3f::new(Vector3f::new(0.5, 0.5, 1.0), down, None, Some(0.5));
        assert!(!rect.ray_intersection_t(&short));

        let behind = Ray3f::new(Vector3f::new(0.5, 0.5, 1.0), -down, None, None);
        assert!(rect.ray_intersection(&behind).is_none());
    }

    #[test]
    fn test_rectangle_skewed_uv() {
        let rect = Rectangle::new(Vector3f::new(1.0, 0.0, 0.0),
                                  Vector3f::new(2.0, 0.0, 0.0),
                                  Vector3f::new(1.0, 1.0, 0.0)).unwrap();
        let target = rect.sample(&Vector2f::new(0.3, 0.6)).p;
        let origin = target + Vector3f::new(0.0, 0.0, 1.0);
        let hit = rect.ray_intersection(&Ray3f::new(origin, target - origin, None, None)).unwrap();

        assert_abs_diff_eq!(hit.uv.x, 0.3, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.uv.y, 0.6, epsilon = 1e-5);
        assert_abs_diff_eq!(rect.surface_area(), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rect.pdf(&target), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_rectangle_rejects_degenerate_edges() {
        let e = Vector3f::new(1.0, 0.0, 0.0);
        assert!(Rectangle::new(Vector3f::zeros(), e, e * 2.0).is_err());
    }
}
