// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Query against an emitter as seen from `reference`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterQueryRecord {
    pub reference: Vector3f,
    /// Point on the emitter.
    pub p: Vector3f,
    /// Surface normal at `p`.
    pub n: Vector3f,
    /// Unit direction from `reference` towards `p`.
    pub wi: Vector3f,
    /// Solid angle density w.r.t. `reference`.
    pub pdf: Float,
    /// Segment between `reference` and `p`, set by `Emitter::sample`.
    pub shadow_ray: Option<Ray3f>,
}

impl EmitterQueryRecord {
    pub fn new(reference: Vector3f) -> Self {
        Self {
            reference,
            p: Vector3f::zeros(),
            n: Vector3f::zeros(),
            wi: Vector3f::zeros(),
            pdf: 0.0,
            shadow_ray: None,
        }
    }

    /// Record for an emitter point that was found by tracing a ray from `reference`.
    pub fn with_hit(reference: Vector3f, p: Vector3f, n: Vector3f) -> Self {
        let d = p - reference;
        let dist = d.norm();
        let wi = if dist > 0.0 { d / dist } else { Vector3f::zeros() };
        Self { reference, p, n, wi, pdf: 0.0, shadow_ray: None }
    }
}

pub trait Emitter: ComputationNode + Send + Sync {
    /// Samples a point on the emitter, fills the record including its shadow
    /// ray and returns radiance divided by the solid angle density.
    fn sample(&self, record: &mut EmitterQueryRecord, u: &Vector2f) -> RGBSpectrum;

    /// Radiance leaving `record.p` towards `record.reference`.
    fn eval(&self, record: &EmitterQueryRecord) -> RGBSpectrum;

    fn pdf(&self, record: &EmitterQueryRecord) -> Float;
}
