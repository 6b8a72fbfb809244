// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::Result;
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::integrators::direct::sample_all_lights;
use crate::integrators::emitted;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Direct illumination by emitter sampling plus the emission of the visible surface.
pub struct DirectEmsIntegrator;

impl DirectEmsIntegrator {
    pub fn from_properties(_props: &PropertyList) -> Result<Self> {
        Ok(Self)
    }
}

impl ComputationNode for DirectEmsIntegrator {
    fn to_string(&self) -> String {
        String::from("DirectEmsIntegrator[]")
    }
}

impl Integrator for DirectEmsIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => return RGBSpectrum::zero(),
        };

        emitted(&its, &ray.origin()) + sample_all_lights(scene, &its, ray, sampler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::IndependentSampler;
    use crate::integrators::test_scenes;
    use crate::math::constants::Vector3f;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_direct_ems_converges_on_lit_plane() {
        let (scene, ray) = test_scenes::lit_plane();
        let value = test_scenes::mean_radiance(&DirectEmsIntegrator, &scene, &ray, 10000, 2);
        assert_abs_diff_eq!(value, test_scenes::LIT_PLANE_RADIANCE, epsilon = 0.01);
    }

    #[test]
    fn test_direct_ems_sees_emitter() {
        let (scene, _) = test_scenes::lit_plane();
        let mut sampler = IndependentSampler::new(3, 0);
        let at_light = Ray3f::new(Vector3f::new(0.0, 0.0, 0.5), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert_eq!(DirectEmsIntegrator.li(&scene, &mut sampler, &at_light), RGBSpectrum::splat(4.0));
    }

    #[test]
    fn test_direct_ems_occluded_light_is_black() {
        let (scene, ray) = test_scenes::occluded_plane();
        let mut sampler = IndependentSampler::new(3, 1);
        for _ in 0..1000 {
            assert!(DirectEmsIntegrator.li(&scene, &mut sampler, &ray).is_black());
        }
    }
}
