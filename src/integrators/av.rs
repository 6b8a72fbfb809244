// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::integrator::Integrator;
use crate::core::properties::PropertyList;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::{EPSILON, Float};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::sample_uniform_hemisphere;

/// Binary ambient visibility: white if a random hemisphere probe of
/// `length` escapes, black otherwise.
pub struct AverageVisibilityIntegrator {
    length: Float,
}

impl AverageVisibilityIntegrator {
    pub fn new(length: Float) -> Result<Self> {
        if !(length > 0.0) {
            return Err(Error::InvalidProperty {
                name: String::from("length"),
                reason: format!("probe length {} must be positive", length),
            });
        }
        Ok(Self { length })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        Self::new(props.get_float("length", Float::INFINITY)?)
    }
}

impl ComputationNode for AverageVisibilityIntegrator {
    fn to_string(&self) -> String {
        format!("AverageVisibilityIntegrator[length: {}]", self.length)
    }
}

impl Integrator for AverageVisibilityIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => return RGBSpectrum::one(),
        };

        let dir = sample_uniform_hemisphere(sampler, &its.sh_frame.n);
        let probe = Ray3f::new(its.p, dir, Some(EPSILON), Some(self.length));
        if scene.ray_intersection_t(&probe) {
            RGBSpectrum::zero()
        } else {
            RGBSpectrum::one()
        }
    }
}
