// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Measure a BSDF sample or query is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Unknown,
    SolidAngle,
    Discrete,
}

// Definitions of types used in BSDF sampling and eval
// processes. Both directions live in the local shading frame;
// `wi` points back along the incoming ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BSDFQueryRecord {
    pub wi: Vector3f,
    pub wo: Vector3f,
    pub eta: Float,
    pub measure: Measure,
    pub uv: Vector2f,
}

impl BSDFQueryRecord {
    /// Record for sampling: only `wi` is known.
    pub fn new(wi: Vector3f, uv: Vector2f) -> Self {
        Self {
            wi,
            wo: Vector3f::zeros(),
            eta: 1.0,
            measure: Measure::Unknown,
            uv,
        }
    }

    /// Record for evaluating a given direction pair.
    pub fn with_directions(wi: Vector3f, wo: Vector3f, measure: Measure, uv: Vector2f) -> Self {
        Self { wi, wo, eta: 1.0, measure, uv }
    }
}

pub trait BSDF: ComputationNode + Send + Sync {
    /// Draws `wo` into the record and returns `f * cos(theta_o) / pdf`,
    /// or black if sampling failed.
    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> RGBSpectrum;

    /// BSDF value for the record's direction pair; black for discrete components.
    fn eval(&self, record: &BSDFQueryRecord) -> RGBSpectrum;

    /// Solid angle density of sampling `wo` given `wi`; zero for discrete components.
    fn pdf(&self, record: &BSDFQueryRecord) -> Float;
}
