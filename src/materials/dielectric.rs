// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFQueryRecord, Measure, BSDF};
use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::materials::microfacet::{fresnel_dielectric, refract};

/// Smooth glass interface. Reflection and refraction are chosen in proportion
/// to the Fresnel reflectance, so every sample carries unit weight.
pub struct Dielectric {
    int_ior: Float,
    ext_ior: Float,
}

impl Dielectric {
    pub fn new(int_ior: Float, ext_ior: Float) -> Result<Self> {
        if !(int_ior > 0.0) || !(ext_ior > 0.0) || !int_ior.is_finite() || !ext_ior.is_finite() {
            return Err(Error::InvalidProperty {
                name: String::from("intIOR/extIOR"),
                reason: format!("indices {} / {} must be positive and finite", int_ior, ext_ior),
            });
        }
        Ok(Self { int_ior, ext_ior })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        // BK7 glass inside, air outside.
        Self::new(props.get_float("intIOR", 1.5046)?,
                  props.get_float("extIOR", 1.000277)?)
    }
}

impl ComputationNode for Dielectric {
    fn to_string(&self) -> String {
        format!("Dielectric[intIOR: {}, extIOR: {}]", self.int_ior, self.ext_ior)
    }
}

impl BSDF for Dielectric {
    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> RGBSpectrum {
        let cos_i = Frame::cos_theta(&record.wi);
        let reflectance = fresnel_dielectric(cos_i, self.ext_ior, self.int_ior);
        let mirrored = Vector3f::new(-record.wi.x, -record.wi.y, record.wi.z);

        record.measure = Measure::Discrete;
        if u.x <= reflectance {
            record.wo = mirrored;
            record.eta = 1.0;
            return RGBSpectrum::one();
        }

        let (n, eta) = if cos_i < 0.0 {
            (Vector3f::new(0.0, 0.0, -1.0), self.int_ior / self.ext_ior)
        } else {
            (Vector3f::new(0.0, 0.0, 1.0), self.ext_ior / self.int_ior)
        };
        match refract(&record.wi, &n, eta) {
            Some(wt) => {
                record.wo = wt.normalize();
                record.eta = eta;
            }
            None => {
                record.wo = mirrored;
                record.eta = 1.0;
            }
        }

        RGBSpectrum::one()
    }

    fn eval(&self, _record: &BSDFQueryRecord) -> RGBSpectrum {
        RGBSpectrum::zero()
    }

    fn pdf(&self, _record: &BSDFQueryRecord) -> Float {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_dielectric_reflection_branch() {
        let bsdf = Dielectric::new(1.5, 1.0).unwrap();
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let mut record = BSDFQueryRecord::new(wi, Vector2f::zeros());
        let weight = bsdf.sample(&mut record, &Vector2f::new(0.0, 0.5));

        assert_eq!(weight, RGBSpectrum::one());
        assert_eq!(record.measure, Measure::Discrete);
        assert_abs_diff_eq!(record.wo.x, -0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(record.wo.z, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_dielectric_refraction_branch() {
        let bsdf = Dielectric::new(1.5, 1.0).unwrap();
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let mut record = BSDFQueryRecord::new(wi, Vector2f::zeros());
        bsdf.sample(&mut record, &Vector2f::new(0.99, 0.5));

        assert!(record.wo.z < 0.0);
        assert_abs_diff_eq!(-record.wo.x, 0.6 / 1.5, epsilon = 1e-5);
        assert_abs_diff_eq!(record.eta, 1.0 / 1.5, epsilon = 1e-6);

        // Leaving the glass bends away from the normal.
        let mut inside = BSDFQueryRecord::new(Vector3f::new(0.3, 0.0, -(1.0f32 - 0.09).sqrt()), Vector2f::zeros());
        bsdf.sample(&mut inside, &Vector2f::new(0.99, 0.5));
        assert!(inside.wo.z > 0.0);
        assert_abs_diff_eq!(-inside.wo.x, 0.45, epsilon = 1e-5);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let bsdf = Dielectric::new(1.5, 1.0).unwrap();
        let wi = Vector3f::new(0.9, 0.0, -(1.0f32 - 0.81).sqrt());
        let mut record = BSDFQueryRecord::new(wi, Vector2f::zeros());
        bsdf.sample(&mut record, &Vector2f::new(0.999, 0.5));

        assert!(record.wo.z < 0.0);
        assert_abs_diff_eq!(record.wo.x, -0.9, epsilon = 1e-5);
    }

    #[test]
    fn test_dielectric_is_discrete() {
        let bsdf = Dielectric::from_properties(&PropertyList::new()).unwrap();
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let record = BSDFQueryRecord::with_directions(up, up, Measure::SolidAngle, Vector2f::zeros());
        assert!(bsdf.eval(&record).is_black());
        assert_eq!(bsdf.pdf(&record), 0.0);
        assert!(Dielectric::new(-1.0, 1.0).is_err());
    }
}
