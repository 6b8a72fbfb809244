// Copyright @yucwang 2026

use crate::core::bsdf::BSDFQueryRecord;
use crate::core::computation_node::ComputationNode;
use crate::core::emitter::EmitterQueryRecord;
use crate::core::error::Result;
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::integrators::{balance_heuristic, bsdf_sample_weight, emitted, sample_light};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Direct illumination combining one light sample per emitter with one BSDF
/// sample through the balance heuristic.
pub struct DirectMisIntegrator;

impl DirectMisIntegrator {
    pub fn from_properties(_props: &PropertyList) -> Result<Self> {
        Ok(Self)
    }
}

impl ComputationNode for DirectMisIntegrator {
    fn to_string(&self) -> String {
        String::from("DirectMisIntegrator[]")
    }
}

impl Integrator for DirectMisIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => return RGBSpectrum::zero(),
        };

        let mut radiance = emitted(&its, &ray.origin());
        let wi = its.to_local(&(-ray.dir()));

        for emitter in scene.emitters() {
            if let Some(sample) = sample_light(scene, &its, &wi, emitter.as_ref(), sampler) {
                let w_em = balance_heuristic(sample.pdf_em, sample.pdf_mat).unwrap_or(1.0);
                radiance += sample.contribution * w_em;
            }
        }

        let bsdf = its.bsdf();
        let mut record = BSDFQueryRecord::new(wi, its.uv);
        let weight = bsdf.sample(&mut record, &sampler.next_2d());
        if weight.is_black() {
            return radiance;
        }

        let bsdf_ray = Ray3f::spawn(its.p, its.to_world(&record.wo));
        let light_its = match scene.ray_intersection(&bsdf_ray) {
            Some(light_its) => light_its,
            None => return radiance,
        };
        if let Some(emitter) = light_its.emitter() {
            let emitter_record = EmitterQueryRecord::with_hit(its.p, light_its.p, light_its.sh_frame.n);
            let w_mat = bsdf_sample_weight(record.measure, bsdf.pdf(&record), emitter.pdf(&emitter_record));
            radiance += emitter.eval(&emitter_record) * weight * w_mat;
        }

        radiance
    }
}
