// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::Result;
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceInteraction;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::integrators::sample_light;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Single bounce direct illumination by explicit light sampling, one sample
/// per emitter. Emission of the visible surface itself is not included.
pub struct DirectIntegrator;

impl DirectIntegrator {
    pub fn from_properties(_props: &PropertyList) -> Result<Self> {
        Ok(Self)
    }
}

/// Sum of one light sample per emitter, reflected towards `-ray`.
pub(crate) fn sample_all_lights(scene: &Scene,
                                its: &SurfaceInteraction<'_>,
                                ray: &Ray3f,
                                sampler: &mut dyn Sampler) -> RGBSpectrum {
    let wi = its.to_local(&(-ray.dir()));
    let mut radiance = RGBSpectrum::zero();
    for emitter in scene.emitters() {
        if let Some(sample) = sample_light(scene, its, &wi, emitter.as_ref(), sampler) {
            radiance += sample.contribution;
        }
    }
    radiance
}

impl ComputationNode for DirectIntegrator {
    fn to_string(&self) -> String {
        String::from("DirectIntegrator[]")
    }
}

impl Integrator for DirectIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        match scene.ray_intersection(ray) {
            Some(its) => sample_all_lights(scene, &its, ray, sampler),
            None => RGBSpectrum::zero(),
        }
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
    fn test_direct_converges_on_lit_plane() {
        let (scene, ray) = test_scenes::lit_plane();
        let value = test_scenes::mean_radiance(&DirectIntegrator, &scene, &ray, 10000, 1);
        assert_abs_diff_eq!(value, test_scenes::LIT_PLANE_RADIANCE, epsilon = 0.01);
    }

    #[test]
    fn test_direct_occluded_light_is_black() {
        let (scene, ray) = test_scenes::occluded_plane();
        let mut sampler = IndependentSampler::new(2, 0);
        for _ in 0..1000 {
            assert!(DirectIntegrator.li(&scene, &mut sampler, &ray).is_black());
        }
    }

    #[test]
    fn test_direct_skips_emission_and_misses() {
        let (scene, _) = test_scenes::lit_plane();
        let mut sampler = IndependentSampler::new(2, 1);
        // Looking straight at the light from below: no Le, and the light's
        // own BSDF is black.
        let at_light = Ray3f::new(Vector3f::new(0.0, 0.0, 0.5), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(DirectIntegrator.li(&scene, &mut sampler, &at_light).is_black());

        let to_sky = Ray3f::new(Vector3f::new(5.0, 5.0, 1.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(DirectIntegrator.li(&scene, &mut sampler, &to_sky).is_black());
    }
}
