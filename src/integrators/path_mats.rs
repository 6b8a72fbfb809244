// Copyright @yucwang 2026

use crate::core::bsdf::BSDFQueryRecord;
use crate::core::computation_node::ComputationNode;
use crate::core::error::Result;
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::integrators::{emitted, russian_roulette};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Unidirectional path tracer that only follows BSDF samples; light is
/// found when a path happens to hit an emitter.
pub struct PathMatsIntegrator;

impl PathMatsIntegrator {
    pub fn from_properties(_props: &PropertyList) -> Result<Self> {
        Ok(Self)
    }
}

impl ComputationNode for PathMatsIntegrator {
    fn to_string(&self) -> String {
        String::from("PathMatsIntegrator[]")
    }
}

impl Integrator for PathMatsIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let mut radiance = RGBSpectrum::zero();
        let mut throughput = RGBSpectrum::one();
        let mut path_ray = *ray;

        while let Some(its) = scene.ray_intersection(&path_ray) {
            radiance += throughput * emitted(&its, &path_ray.origin());

            let mut record = BSDFQueryRecord::new(its.to_local(&(-path_ray.dir())), its.uv);
            let weight = its.bsdf().sample(&mut record, &sampler.next_2d());
            if weight.is_black() {
                break;
            }
            throughput *= weight;
            path_ray = Ray3f::spawn(its.p, its.to_world(&record.wo));

            if !russian_roulette(&mut throughput, sampler) {
                break;
            }
        }

        radiance
    }
}
