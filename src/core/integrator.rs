// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

pub trait Integrator: ComputationNode + Send + Sync {
    /// Estimates the radiance arriving along `ray`. Never fails; degenerate
    /// configurations contribute black.
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum;
}
