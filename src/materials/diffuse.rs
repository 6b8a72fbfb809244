// Copyright @yucwang 2023

use crate::core::bsdf::{BSDFQueryRecord, Measure, BSDF};
use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::math::constants::{ Float, INV_PI, Vector2f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ square_to_cosine_hemisphere, square_to_cosine_hemisphere_pdf };

/// Ideal Lambertian reflector.
pub struct Diffuse {
    albedo: RGBSpectrum
}

impl Diffuse {
    pub fn new(albedo: RGBSpectrum) -> Result<Self> {
        if !albedo.is_valid() {
            return Err(Error::InvalidProperty {
                name: String::from("albedo"),
                reason: format!("{} has negative or non-finite channels", albedo),
            });
        }
        Ok(Self { albedo })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        Self::new(props.get_color("albedo", RGBSpectrum::splat(0.5))?)
    }

    fn is_reflection(record: &BSDFQueryRecord) -> bool {
        Frame::cos_theta(&record.wi) > 0.0 && Frame::cos_theta(&record.wo) > 0.0
    }
}

impl ComputationNode for Diffuse {
    fn to_string(&self) -> String {
        format!("Diffuse[albedo: {}]", self.albedo)
    }
}

impl BSDF for Diffuse {
    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> RGBSpectrum {
        if Frame::cos_theta(&record.wi) <= 0.0 {
            return RGBSpectrum::zero();
        }

        record.measure = Measure::SolidAngle;
        record.wo = square_to_cosine_hemisphere(u);
        record.eta = 1.0;

        // eval * cos / pdf, the cosines cancel.
        self.albedo
    }

    fn eval(&self, record: &BSDFQueryRecord) -> RGBSpectrum {
        if record.measure != Measure::SolidAngle || !Self::is_reflection(record) {
            return RGBSpectrum::zero();
        }
        self.albedo * INV_PI
    }

    fn pdf(&self, record: &BSDFQueryRecord) -> Float {
        if record.measure != Measure::SolidAngle || !Self::is_reflection(record) {
            return 0.0;
        }
        square_to_cosine_hemisphere_pdf(&record.wo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::Property;
    use crate::math::constants::Vector3f;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_diffuse_eval_and_pdf() {
        let bsdf = Diffuse::new(RGBSpectrum::splat(0.5)).unwrap();
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let record = BSDFQueryRecord::with_directions(up, up, Measure::SolidAngle, Vector2f::zeros());

        assert_abs_diff_eq!(bsdf.eval(&record).r(), 0.5 * INV_PI, epsilon = 1e-6);
        assert_abs_diff_eq!(bsdf.pdf(&record), INV_PI, epsilon = 1e-6);

        let below = BSDFQueryRecord::with_directions(up, -up, Measure::SolidAngle, Vector2f::zeros());
        assert!(bsdf.eval(&below).is_black());
        assert_eq!(bsdf.pdf(&below), 0.0);
    }

    #[test]
    fn test_diffuse_sample_matches_eval() {
        let bsdf = Diffuse::new(RGBSpectrum::new(0.2, 0.4, 0.6)).unwrap();
        let wi = Vector3f::new(0.3, 0.0, 1.0).normalize();
        let mut record = BSDFQueryRecord::new(wi, Vector2f::zeros());
        let weight = bsdf.sample(&mut record, &Vector2f::new(0.3, 0.7));

        assert_eq!(record.measure, Measure::SolidAngle);
        let expected = bsdf.eval(&record) * Frame::cos_theta(&record.wo) / bsdf.pdf(&record);
        assert_abs_diff_eq!(weight.g(), expected.g(), epsilon = 1e-5);

        let mut back = BSDFQueryRecord::new(-wi, Vector2f::zeros());
        assert!(bsdf.sample(&mut back, &Vector2f::new(0.3, 0.7)).is_black());
    }

    #[test]
    fn test_diffuse_properties() {
        assert!(Diffuse::from_properties(&PropertyList::new()).is_ok());
        let props = PropertyList::new()
            .with("albedo", Property::Color(RGBSpectrum::new(0.5, -0.1, 0.5))).unwrap();
        assert!(Diffuse::from_properties(&props).is_err());
    }
}
