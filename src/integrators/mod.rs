// Copyright @yucwang 2026

//! Radiance estimators and the helpers they share.
//!
//! Every estimator is selected by name through [`create_integrator`].

pub mod av;
pub mod direct;
pub mod direct_ems;
pub mod direct_mis;
pub mod path_mats;
pub mod path_mis;

use crate::core::bsdf::{BSDFQueryRecord, Measure};
use crate::core::emitter::{Emitter, EmitterQueryRecord};
use crate::core::error::{Error, Result};
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceInteraction;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::{EPSILON, Float, Vector3f};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;

/// Upper bound of the Russian roulette survival probability.
pub const RR_MAX_SURVIVAL: Float = 0.99;

pub type IntegratorConstructor = fn(&PropertyList) -> Result<Box<dyn Integrator>>;

fn create_av(props: &PropertyList) -> Result<Box<dyn Integrator>> {
    Ok(Box::new(av::AverageVisibilityIntegrator::from_properties(props)?))
}

fn create_direct(props: &PropertyList) -> Result<Box<dyn Integrator>> {
    Ok(Box::new(direct::DirectIntegrator::from_properties(props)?))
}

fn create_direct_ems(props: &PropertyList) -> Result<Box<dyn Integrator>> {
    Ok(Box::new(direct_ems::DirectEmsIntegrator::from_properties(props)?))
}

fn create_direct_mis(props: &PropertyList) -> Result<Box<dyn Integrator>> {
    Ok(Box::new(direct_mis::DirectMisIntegrator::from_properties(props)?))
}

fn create_path_mats(props: &PropertyList) -> Result<Box<dyn Integrator>> {
    Ok(Box::new(path_mats::PathMatsIntegrator::from_properties(props)?))
}

fn create_path_mis(props: &PropertyList) -> Result<Box<dyn Integrator>> {
    Ok(Box::new(path_mis::PathMisIntegrator::from_properties(props)?))
}

const INTEGRATORS: &[(&str, IntegratorConstructor)] = &[
    ("av", create_av),
    ("direct", create_direct),
    ("direct_ems", create_direct_ems),
    ("direct_mis", create_direct_mis),
    ("path_mats", create_path_mats),
    ("path_mis", create_path_mis),
];

pub fn create_integrator(name: &str, props: &PropertyList) -> Result<Box<dyn Integrator>> {
    match INTEGRATORS.iter().find(|(key, _)| *key == name) {
        Some((_, constructor)) => constructor(props),
        None => Err(Error::UnknownPlugin { kind: "integrator", name: name.to_string() }),
    }
}

/// One explicit light sample as seen from a surface point.
pub struct LightSample {
    /// `Le * f * |cos| / pdf_em`
    pub contribution: RGBSpectrum,
    /// Solid angle density of the emitter sample, light selection excluded.
    pub pdf_em: Float,
    /// Density of the BSDF sampling the same direction.
    pub pdf_mat: Float,
}

/// `pdf_a / (pdf_a + pdf_b)`, or `None` when both densities are effectively zero.
pub fn balance_heuristic(pdf_a: Float, pdf_b: Float) -> Option<Float> {
    let sum = pdf_a + pdf_b;
    if sum >= EPSILON {
        Some(pdf_a / sum)
    } else {
        None
    }
}

/// Weight of a BSDF sampled direction that happened to hit an emitter.
/// Discrete samples have no competing light sampling strategy.
pub fn bsdf_sample_weight(measure: Measure, pdf_mat: Float, pdf_em: Float) -> Float {
    if measure == Measure::Discrete {
        return 1.0;
    }
    balance_heuristic(pdf_mat, pdf_em).unwrap_or(1.0)
}

/// Stochastic path termination. Returns false when the path is killed,
/// otherwise compensates the throughput for the survival probability.
pub fn russian_roulette(throughput: &mut RGBSpectrum, sampler: &mut dyn Sampler) -> bool {
    let survival = throughput.max_coeff().min(RR_MAX_SURVIVAL);
    if !(survival > 0.0) || sampler.next_1d() > survival {
        return false;
    }
    *throughput /= survival;
    true
}

/// Radiance emitted by the hit surface towards `origin`.
pub fn emitted(its: &SurfaceInteraction<'_>, origin: &Vector3f) -> RGBSpectrum {
    match its.emitter() {
        Some(emitter) => {
            let record = EmitterQueryRecord::with_hit(*origin, its.p, its.sh_frame.n);
            emitter.eval(&record)
        }
        None => RGBSpectrum::zero(),
    }
}

/// Samples `emitter` from `its`, `wi` being the local direction back along
/// the incoming ray. `None` when the sample is occluded or carries no energy.
pub fn sample_light(scene: &Scene,
                    its: &SurfaceInteraction<'_>,
                    wi: &Vector3f,
                    emitter: &dyn Emitter,
                    sampler: &mut dyn Sampler) -> Option<LightSample> {
    let mut record = EmitterQueryRecord::new(its.p);
    let value = emitter.sample(&mut record, &sampler.next_2d());
    if value.is_black() {
        return None;
    }

    let shadow_ray = record.shadow_ray?;
    if scene.ray_intersection_t(&shadow_ray) {
        return None;
    }

    let wo = its.to_local(&record.wi);
    let bsdf_record = BSDFQueryRecord::with_directions(*wi, wo, Measure::SolidAngle, its.uv);
    let bsdf = its.bsdf();
    let contribution = value * bsdf.eval(&bsdf_record) * Frame::cos_theta(&wo).abs();
    if contribution.is_black() {
        return None;
    }

    Some(LightSample {
        contribution,
        pdf_em: record.pdf,
        pdf_mat: bsdf.pdf(&bsdf_record),
    })
}
