// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::math::constants::Vector2f;
use crate::math::ray::Ray3f;

pub trait Sensor: ComputationNode + Send + Sync {
    /// Primary ray through the film position `u` in `[0,1]²`, (0,0) being the top left corner.
    fn sample_ray(&self, u: &Vector2f) -> Ray3f;
    /// Film size as (width, height).
    fn resolution(&self) -> (usize, usize);
}
