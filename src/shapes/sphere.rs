// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::interaction::{ShapeIntersection, ShapeSampleRecord};
use crate::core::properties::PropertyList;
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, Vector3f, INV_FOUR_PI, INV_PI, INV_TWO_PI, PI};
use crate::math::ray::Ray3f;
use crate::math::warp::square_to_uniform_sphere;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
    // Normals point inwards, used for furnace style enclosures.
    flip_normals: bool,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float, flip_normals: bool) -> Result<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(Error::InvalidProperty {
                name: String::from("radius"),
                reason: format!("{} is not a positive finite radius", radius),
            });
        }
        Ok(Self { center, radius, flip_normals })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        let center = props.get_point("center", Vector3f::zeros())?;
        let radius = props.get_float("radius", 1.0)?;
        let flip_normals = props.get_boolean("flipNormals", false)?;
        Self::new(center, radius, flip_normals)
    }

    fn nearest_root(&self, ray: &Ray3f) -> Option<Float> {
        // Ray directions are unit length, so a == 1.
        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(&ray.dir());
        let c = oc.norm_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let q = if b < 0.0 { -0.5 * (b - root) } else { -0.5 * (b + root) };

        let (mut t0, mut t1) = if q != 0.0 { (q, c / q) } else { (0.0, 0.0) };
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if ray.test_segment(t0) {
            Some(t0)
        } else if ray.test_segment(t1) {
            Some(t1)
        } else {
            None
        }
    }

    fn outward(&self, n: Vector3f) -> Vector3f {
        if self.flip_normals { -n } else { n }
    }
}

impl ComputationNode for Sphere {
    fn to_string(&self) -> String {
        format!("Sphere[center: {:?}, radius: {}, flip_normals: {}]",
                self.center, self.radius, self.flip_normals)
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeIntersection> {
        let t = self.nearest_root(ray)?;
        let p = ray.at(t);
        let n = (p - self.center).normalize();
        let uv = Vector2f::new(0.5 + n.y.atan2(n.x) * INV_TWO_PI,
                               n.z.max(-1.0).min(1.0).acos() * INV_PI);

        Some(ShapeIntersection { t, p, n: self.outward(n), uv })
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.nearest_root(ray).is_some()
    }

    fn sample(&self, u: &Vector2f) -> ShapeSampleRecord {
        let q = square_to_uniform_sphere(u);
        ShapeSampleRecord {
            p: self.center + q * self.radius,
            n: self.outward(q),
            pdf: INV_FOUR_PI / (self.radius * self.radius),
        }
    }

    fn pdf(&self, _p: &Vector3f) -> Float {
        INV_FOUR_PI / (self.radius * self.radius)
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }
}
