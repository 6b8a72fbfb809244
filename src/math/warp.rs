// Copyright @yucwang 2023

//! Warping functions from the unit square to the domains the integrators
//! sample, each paired with the density of the warped samples.
//!
//! Densities never fault: inputs outside the support, off the unit sphere,
//! of zero length or NaN all evaluate to 0.

use super::constants::{ EPSILON, INV_FOUR_PI, INV_PI, INV_TWO_PI, PI, Float, Vector2f, Vector3f };
use super::frame::Frame;
use crate::core::sampler::Sampler;

const MAX_REJECTION_TRIALS: usize = 1024;

fn is_unit(v: &Vector3f) -> bool {
    (1.0 - v.norm()).abs() < EPSILON
}

fn spherical_direction(cos_theta: Float, phi: Float) -> Vector3f {
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Uniform direction on the hemisphere around `pole` by rejection sampling
/// the unit ball. Takes 6/pi trials on average, three `next_1d` draws each.
pub fn sample_uniform_hemisphere(sampler: &mut dyn Sampler, pole: &Vector3f) -> Vector3f {
    for _ in 0..MAX_REJECTION_TRIALS {
        let v = Vector3f::new(1.0 - 2.0 * sampler.next_1d(),
                              1.0 - 2.0 * sampler.next_1d(),
                              1.0 - 2.0 * sampler.next_1d());
        let norm2 = v.norm_squared();
        if norm2 > 1.0 || norm2 == 0.0 {
            continue;
        }

        let v = if v.dot(pole) < 0.0 { -v } else { v };
        return v / norm2.sqrt();
    }

    let local = square_to_uniform_hemisphere(&sampler.next_2d());
    Frame::from_normal(&pole.normalize()).to_world(&local)
}

pub fn square_to_uniform_square(sample: &Vector2f) -> Vector2f {
    *sample
}

pub fn square_to_uniform_square_pdf(p: &Vector2f) -> Float {
    if p.x >= 0.0 && p.x <= 1.0 && p.y >= 0.0 && p.y <= 1.0 {
        1.0
    } else {
        0.0
    }
}

pub fn square_to_uniform_disk(sample: &Vector2f) -> Vector2f {
    let r = sample.x.sqrt();
    let (sin_theta, cos_theta) = (2.0 * PI * sample.y).sin_cos();
    Vector2f::new(r * cos_theta, r * sin_theta)
}

pub fn square_to_uniform_disk_pdf(p: &Vector2f) -> Float {
    if p.norm() < 1.0 {
        INV_PI
    } else {
        0.0
    }
}

pub fn square_to_uniform_sphere_cap(sample: &Vector2f, cos_theta_max: Float) -> Vector3f {
    let z = cos_theta_max + (1.0 - cos_theta_max) * sample.x;
    spherical_direction(z, 2.0 * PI * sample.y)
}

pub fn square_to_uniform_sphere_cap_pdf(v: &Vector3f, cos_theta_max: Float) -> Float {
    if !(cos_theta_max < 1.0) {
        return 0.0;
    }
    if is_unit(v) && v.z > cos_theta_max {
        INV_TWO_PI / (1.0 - cos_theta_max)
    } else {
        0.0
    }
}

pub fn square_to_uniform_sphere(sample: &Vector2f) -> Vector3f {
    spherical_direction(2.0 * sample.x - 1.0, 2.0 * PI * sample.y)
}

pub fn square_to_uniform_sphere_pdf(v: &Vector3f) -> Float {
    if is_unit(v) {
        INV_FOUR_PI
    } else {
        0.0
    }
}

pub fn square_to_uniform_hemisphere(sample: &Vector2f) -> Vector3f {
    spherical_direction(sample.x, 2.0 * PI * sample.y)
}

pub fn square_to_uniform_hemisphere_pdf(v: &Vector3f) -> Float {
    if is_unit(v) && v.z > 0.0 {
        INV_TWO_PI
    } else {
        0.0
    }
}

pub fn square_to_cosine_hemisphere(sample: &Vector2f) -> Vector3f {
    spherical_direction(sample.y.sqrt(), 2.0 * PI * sample.x)
}

pub fn square_to_cosine_hemisphere_pdf(v: &Vector3f) -> Float {
    if is_unit(v) && v.z > 0.0 {
        v.z * INV_PI
    } else {
        0.0
    }
}

/// Beckmann-distributed microfacet normal, `tan^2(theta) = -alpha^2 ln(1 - u)`.
pub fn square_to_beckmann(sample: &Vector2f, alpha: Float) -> Vector3f {
    let tan2_theta = -alpha * alpha * (1.0 - sample.y).ln();
    let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
    spherical_direction(cos_theta, 2.0 * PI * sample.x)
}

/// Density of `square_to_beckmann`, i.e. `D(m) cos(theta_m)`.
pub fn square_to_beckmann_pdf(m: &Vector3f, alpha: Float) -> Float {
    if !(alpha > 0.0) || !is_unit(m) || !(m.z > 0.0) {
        return 0.0;
    }

    let cos_theta = m.z.min(1.0);
    let cos2_theta = cos_theta * cos_theta;
    let tan2_theta = (1.0 - cos2_theta).max(0.0) / cos2_theta;
    let alpha2 = alpha * alpha;
    (-tan2_theta / alpha2).exp() / (PI * alpha2 * cos2_theta * cos_theta)
}

/// Barycentric coordinates `(u, v, 1 - u - v)` uniform over a triangle.
pub fn square_to_uniform_triangle(sample: &Vector2f) -> Vector3f {
    let su1 = sample.x.sqrt();
    let u = 1.0 - su1;
    let v = sample.y * su1;
    Vector3f::new(u, v, 1.0 - u - v)
}
