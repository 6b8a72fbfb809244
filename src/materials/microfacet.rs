// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFQueryRecord, Measure, BSDF};
use crate::core::computation_node::ComputationNode;
use crate::core::error::{Error, Result};
use crate::core::properties::PropertyList;
use crate::math::constants::{Float, Vector2f, Vector3f, INV_PI};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{
    square_to_beckmann, square_to_beckmann_pdf, square_to_cosine_hemisphere,
};

pub fn reflect(wi: &Vector3f, m: &Vector3f) -> Vector3f {
    2.0 * wi.dot(m) * m - wi
}

/// Refracts `wi` about `m` with relative index `eta = eta_i / eta_t`;
/// `None` on total internal reflection.
pub fn refract(wi: &Vector3f, m: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = wi.dot(m).max(-1.0).min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let wt = -eta * wi + (eta * cos_i - cos_t) * m;
    Some(wt)
}

/// Unpolarized Fresnel reflectance; a negative `cos_i` means `wi` is on the `eta_t` side.
pub fn fresnel_dielectric(cos_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (eta_i, eta_t) } else { (eta_t, eta_i) };
    cos_i = cos_i.abs();

    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

/// Beckmann normal distribution `D(m)`.
pub fn beckmann_d(m: &Vector3f, alpha: Float) -> Float {
    let cos_theta = Frame::cos_theta(m);
    if cos_theta <= 0.0 {
        return 0.0;
    }
    square_to_beckmann_pdf(m, alpha) / cos_theta
}

/// Smith shadowing term for the Beckmann distribution, rational approximation.
pub fn beckmann_g1(wv: &Vector3f, wh: &Vector3f, alpha: Float) -> Float {
    let cos_v = Frame::cos_theta(wv);
    if cos_v == 0.0 || wv.dot(wh) / cos_v <= 0.0 {
        return 0.0;
    }

    let tan_theta = (1.0 - cos_v * cos_v).max(0.0).sqrt() / cos_v.abs();
    if tan_theta == 0.0 {
        return 1.0;
    }

    let b = 1.0 / (alpha * tan_theta);
    if b >= 1.6 {
        return 1.0;
    }
    let b2 = b * b;
    (3.535 * b + 2.181 * b2) / (1.0 + 2.276 * b + 2.577 * b2)
}

/// Diffuse base plus a Beckmann specular lobe.
pub struct Microfacet {
    alpha: Float,
    int_ior: Float,
    ext_ior: Float,
    kd: RGBSpectrum,
    ks: Float,
}

impl Microfacet {
    pub fn new(alpha: Float, int_ior: Float, ext_ior: Float, kd: RGBSpectrum) -> Result<Self> {
        if !(alpha > 0.0) || !alpha.is_finite() {
            return Err(Error::InvalidProperty {
                name: String::from("alpha"),
                reason: format!("roughness {} must be positive and finite", alpha),
            });
        }
        if !(int_ior > 0.0) || !(ext_ior > 0.0) {
            return Err(Error::InvalidProperty {
                name: String::from("intIOR/extIOR"),
                reason: format!("indices {} / {} must be positive", int_ior, ext_ior),
            });
        }
        if !kd.is_valid() || kd.max_coeff() > 1.0 {
            return Err(Error::InvalidProperty {
                name: String::from("kd"),
                reason: format!("{} must lie in [0, 1]", kd),
            });
        }

        Ok(Self { alpha, int_ior, ext_ior, kd, ks: 1.0 - kd.max_coeff() })
    }

    pub fn from_properties(props: &PropertyList) -> Result<Self> {
        Self::new(props.get_float("alpha", 0.1)?,
                  props.get_float("intIOR", 1.5046)?,
                  props.get_float("extIOR", 1.000277)?,
                  props.get_color("kd", RGBSpectrum::splat(0.5))?)
    }
}

impl ComputationNode for Microfacet {
    fn to_string(&self) -> String {
        format!("Microfacet[alpha: {}, intIOR: {}, extIOR: {}, kd: {}, ks: {}]",
                self.alpha, self.int_ior, self.ext_ior, self.kd, self.ks)
    }
}

impl BSDF for Microfacet {
    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> RGBSpectrum {
        if Frame::cos_theta(&record.wi) <= 0.0 {
            return RGBSpectrum::zero();
        }

        record.wo = if u.x < self.ks {
            let reused = Vector2f::new(u.x / self.ks, u.y);
            let wh = square_to_beckmann(&reused, self.alpha);
            reflect(&record.wi, &wh)
        } else {
            let reused = Vector2f::new((u.x - self.ks) / (1.0 - self.ks), u.y);
            square_to_cosine_hemisphere(&reused)
        };
        record.measure = Measure::SolidAngle;
        record.eta = 1.0;

        let cos_o = Frame::cos_theta(&record.wo);
        if cos_o <= 0.0 {
            return RGBSpectrum::zero();
        }
        let pdf = self.pdf(record);
        if !(pdf > 0.0) {
            return RGBSpectrum::zero();
        }

        self.eval(record) * cos_o / pdf
    }

    fn eval(&self, record: &BSDFQueryRecord) -> RGBSpectrum {
        let cos_i = Frame::cos_theta(&record.wi);
        let cos_o = Frame::cos_theta(&record.wo);
        if record.measure != Measure::SolidAngle || cos_i <= 0.0 || cos_o <= 0.0 {
            return RGBSpectrum::zero();
        }

        let wh = (record.wi + record.wo).normalize();
        let d = beckmann_d(&wh, self.alpha);
        let f = fresnel_dielectric(wh.dot(&record.wi), self.ext_ior, self.int_ior);
        let g = beckmann_g1(&record.wi, &wh, self.alpha) * beckmann_g1(&record.wo, &wh, self.alpha);

        self.kd * INV_PI + RGBSpectrum::splat(self.ks * d * f * g / (4.0 * cos_i * cos_o))
    }

    fn pdf(&self, record: &BSDFQueryRecord) -> Float {
        let cos_i = Frame::cos_theta(&record.wi);
        let cos_o = Frame::cos_theta(&record.wo);
        if record.measure != Measure::SolidAngle || cos_i <= 0.0 || cos_o <= 0.0 {
            return 0.0;
        }

        let wh = (record.wi + record.wo).normalize();
        let jacobian = 1.0 / (4.0 * wh.dot(&record.wo).abs());
        self.ks * square_to_beckmann_pdf(&wh, self.alpha) * jacobian
            + (1.0 - self.ks) * cos_o * INV_PI
    }
}
