// Copyright @yucwang 2023

use crate::core::interaction::{ ShapeIntersection, ShapeSampleRecord };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

pub trait Shape: crate::core::computation_node::ComputationNode + Send + Sync {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeIntersection>;
    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.ray_intersection(ray).is_some()
    }
    /// Uniform point on the surface with its area density.
    fn sample(&self, u: &Vector2f) -> ShapeSampleRecord;
    /// Area density of `sample` at the surface point `p`.
    fn pdf(&self, p: &Vector3f) -> Float;
    fn surface_area(&self) -> Float;
}
