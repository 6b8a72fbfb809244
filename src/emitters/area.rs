// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::emitter::{Emitter, EmitterQueryRecord};
use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, Float, Vector2f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Constant radiance leaving the front side of a shape.
pub struct AreaEmitter {
    shape: Arc<dyn Shape>,
    radiance: RGBSpectrum,
}

impl AreaEmitter {
    pub fn from_shape(shape: Arc<dyn Shape>, radiance: RGBSpectrum) -> Self {
        Self { shape, radiance }
    }

    pub fn from_properties(props: &PropertyList, shape: Arc<dyn Shape>) -> Result<Self> {
        let radiance = props.color("radiance")?;
        if !radiance.is_valid() {
            return Err(Error::InvalidProperty {
                name: String::from("radiance"),
                reason: format!("{} has negative or non-finite channels", radiance),
            });
        }
        Ok(Self::from_shape(shape, radiance))
    }
}

impl ComputationNode for AreaEmitter {
    fn to_string(&self) -> String {
        format!("AreaEmitter[radiance: {}, shape: {}]", self.radiance, self.shape.to_string())
    }
}

impl Emitter for AreaEmitter {
    fn sample(&self, record: &mut EmitterQueryRecord, u: &Vector2f) -> RGBSpectrum {
        let point = self.shape.sample(u);
        let d = point.p - record.reference;
        let dist = d.norm();
        if !(dist > 0.0) {
            return RGBSpectrum::zero();
        }

        record.p = point.p;
        record.n = point.n;
        record.wi = d / dist;
        record.shadow_ray = Some(Ray3f::new(record.reference, record.wi,
                                            Some(EPSILON), Some(dist - EPSILON)));
        record.pdf = self.pdf(record);
        if !(record.pdf > 0.0) || !record.pdf.is_finite() {
            return RGBSpectrum::zero();
        }

        self.eval(record) / record.pdf
    }

    fn eval(&self, record: &EmitterQueryRecord) -> RGBSpectrum {
        if record.n.dot(&(-record.wi)) > 0.0 {
            self.radiance
        } else {
            RGBSpectrum::zero()
        }
    }

    fn pdf(&self, record: &EmitterQueryRecord) -> Float {
        let cos_theta = record.n.dot(&(-record.wi));
        if cos_theta <= 0.0 {
            return 0.0;
        }
        let dist2 = (record.p - record.reference).norm_squared();
        self.shape.pdf(&record.p) * dist2 / cos_theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::properties::Property;
    use crate::math::constants::Vector3f;
    use crate::shapes::rectangle::Rectangle;
    use approx::assert_abs_diff_eq;

    fn ceiling_light() -> AreaEmitter {
        // Unit square at z = 2, facing down.
        let shape = Rectangle::new(Vector3f::new(-0.5, -0.5, 2.0),
                                   Vector3f::new(0.0, 1.0, 0.0),
                                   Vector3f::new(1.0, 0.0, 0.0)).unwrap();
        AreaEmitter::from_shape(Arc::new(shape), RGBSpectrum::splat(3.0))
    }

    #[test]
    fn test_area_emitter_sample() {
        let emitter = ceiling_light();
        let mut record = EmitterQueryRecord::new(Vector3f::zeros());
        let value = emitter.sample(&mut record, &Vector2f::new(0.5, 0.5));

        assert_abs_diff_eq!(record.p.z, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(record.wi.z, 1.0, epsilon = 1e-6);
        // pdf = (1 / area) * d^2 / cos
        assert_abs_diff_eq!(record.pdf, 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(value.r(), 0.75, epsilon = 1e-5);

        let shadow = record.shadow_ray.unwrap();
        assert_abs_diff_eq!(shadow.max_t, 2.0 - EPSILON, epsilon = 1e-6);
        assert_eq!(shadow.min_t, EPSILON);
    }

    #[test]
    fn test_area_emitter_back_side() {
        let emitter = ceiling_light();
        let mut record = EmitterQueryRecord::new(Vector3f::new(0.0, 0.0, 3.0));
        assert!(emitter.sample(&mut record, &Vector2f::new(0.5, 0.5)).is_black());
        assert_eq!(emitter.pdf(&record), 0.0);
        assert!(emitter.eval(&record).is_black());
    }

    #[test]
    fn test_area_emitter_eval_matches_sample_pdf() {
        let emitter = ceiling_light();
        let reference = Vector3f::new(0.2, -0.1, 0.0);
        let mut sampled = EmitterQueryRecord::new(reference);
        emitter.sample(&mut sampled, &Vector2f::new(0.1, 0.8));

        let hit = EmitterQueryRecord::with_hit(reference, sampled.p, sampled.n);
        assert_abs_diff_eq!(emitter.pdf(&hit), sampled.pdf, epsilon = 1e-4);
        assert_eq!(emitter.eval(&hit), RGBSpectrum::splat(3.0));
    }

    #[test]
    fn test_area_emitter_properties() {
        let shape: Arc<dyn Shape> = Arc::new(Rectangle::from_properties(&PropertyList::new()).unwrap());
        assert!(matches!(AreaEmitter::from_properties(&PropertyList::new(), shape.clone()),
                         Err(Error::MissingProperty(_))));

        let props = PropertyList::new()
            .with("radiance", Property::Color(RGBSpectrum::splat(-1.0))).unwrap();
        assert!(AreaEmitter::from_properties(&props, shape).is_err());
    }
}
