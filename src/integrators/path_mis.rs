// Copyright @yucwang 2026

use crate::core::bsdf::BSDFQueryRecord;
use crate::core::computation_node::ComputationNode;
use crate::core::emitter::EmitterQueryRecord;
use crate::core::error::Result;
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::integrators::{balance_heuristic, bsdf_sample_weight, emitted, russian_roulette, sample_light};
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Unidirectional path tracer combining BSDF sampling with one explicit
/// light sample per vertex. Emission found by the BSDF sample is weighted
/// when the path reaches the next vertex.
pub struct PathMisIntegrator;

impl PathMisIntegrator {
    pub fn from_properties(_props: &PropertyList) -> Result<Self> {
        Ok(Self)
    }
}

impl ComputationNode for PathMisIntegrator {
    fn to_string(&self) -> String {
        String::from("PathMisIntegrator[]")
    }
}

impl Integrator for PathMisIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let mut radiance = RGBSpectrum::zero();
        let mut throughput = RGBSpectrum::one();
        let mut path_ray = *ray;
        let mut its = match scene.ray_intersection(&path_ray) {
            Some(its) => its,
            None => return radiance,
        };
        // Weight of the emission found at `its`, decided at the previous vertex.
        let mut w_mat: Float = 1.0;
        let light_count = scene.emitters().len() as Float;

        loop {
            radiance += throughput * emitted(&its, &path_ray.origin()) * w_mat;

            if !russian_roulette(&mut throughput, sampler) {
                break;
            }

            let wi = its.to_local(&(-path_ray.dir()));
            let bsdf = its.bsdf();

            if let Some(emitter) = scene.random_emitter(sampler.next_1d()) {
                if let Some(sample) = sample_light(scene, &its, &wi, emitter, sampler) {
                    let w_em = balance_heuristic(sample.pdf_em / light_count, sample.pdf_mat).unwrap_or(1.0);
                    radiance += throughput * sample.contribution * (w_em * light_count);
                }
            }

            let mut record = BSDFQueryRecord::new(wi, its.uv);
            let weight = bsdf.sample(&mut record, &sampler.next_2d());
            if weight.is_black() {
                break;
            }
            throughput *= weight;

            path_ray = Ray3f::spawn(its.p, its.to_world(&record.wo));
            let next = match scene.ray_intersection(&path_ray) {
                Some(next) => next,
                None => break,
            };

            w_mat = match next.emitter() {
                Some(emitter) => {
                    let emitter_record = EmitterQueryRecord::with_hit(its.p, next.p, next.sh_frame.n);
                    let pdf_em = emitter.pdf(&emitter_record) / light_count;
                    bsdf_sample_weight(record.measure, bsdf.pdf(&record), pdf_em)
                }
                None => 1.0,
            };
            its = next;
        }

        radiance
    }
}
