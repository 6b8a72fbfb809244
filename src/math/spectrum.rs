// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

use std::fmt;
use std::ops;

/// Linear RGB radiance / reflectance triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: Vector3f::new(0.0f32, 0.0f32, 0.0f32) }
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn splat(v: Float) -> Self {
        Self::new(v, v, v)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::splat(1.0)
    }

    pub fn r(&self) -> Float {
        self.rgb.x
    }

    pub fn g(&self) -> Float {
        self.rgb.y
    }

    pub fn b(&self) -> Float {
        self.rgb.z
    }

    pub fn is_black(&self) -> bool {
        self.rgb.iter().all(|&c| c == 0.0)
    }

    pub fn max_coeff(&self) -> Float {
        self.rgb.x.max(self.rgb.y).max(self.rgb.z)
    }

    /// Finite and non-negative in every channel.
    pub fn is_valid(&self) -> bool {
        self.rgb.iter().all(|&c| c.is_finite() && c >= 0.0)
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.rgb.x, self.rgb.y, self.rgb.z)
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, idx: usize) -> &Float {
        &self.rgb[idx]
    }
}

impl ops::Add for RGBSpectrum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { rgb: self.rgb + rhs.rgb }
    }
}

impl ops::AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: Self) {
        self.rgb += rhs.rgb;
    }
}

impl ops::Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { rgb: self.rgb - rhs.rgb }
    }
}

impl ops::Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self { rgb: self.rgb.component_mul(&rhs.rgb) }
    }
}

impl ops::MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, rhs: Self) {
        self.rgb.component_mul_assign(&rhs.rgb);
    }
}

impl ops::Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self {
        Self { rgb: self.rgb * rhs }
    }
}

impl ops::Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, rhs: RGBSpectrum) -> RGBSpectrum {
        rhs * self
    }
}

impl ops::MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, rhs: Float) {
        self.rgb *= rhs;
    }
}

impl ops::Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, rhs: Float) -> Self {
        Self { rgb: self.rgb / rhs }
    }
}

impl ops::DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, rhs: Float) {
        self.rgb /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::RGBSpectrum;

    #[test]
    fn test_black_and_max_coeff() {
        assert!(RGBSpectrum::zero().is_black());
        assert!(!RGBSpectrum::new(0.0, 0.1, 0.0).is_black());
        assert_eq!(RGBSpectrum::new(0.2, 0.7, 0.4).max_coeff(), 0.7);
    }

    #[test]
    fn test_arithmetic_is_componentwise() {
        let a = RGBSpectrum::new(1.0, 2.0, 3.0);
        let b = RGBSpectrum::new(0.5, 0.25, 2.0);
        assert_eq!(a * b, RGBSpectrum::new(0.5, 0.5, 6.0));
        assert_eq!(a + b, RGBSpectrum::new(1.5, 2.25, 5.0));
        assert_eq!(a / 2.0, RGBSpectrum::new(0.5, 1.0, 1.5));
        assert_eq!(2.0 * b, RGBSpectrum::new(1.0, 0.5, 4.0));
    }

    #[test]
    fn test_validity() {
        assert!(RGBSpectrum::new(0.0, 1.0, 2.0).is_valid());
        assert!(!RGBSpectrum::new(-0.1, 1.0, 2.0).is_valid());
        assert!(!RGBSpectrum::new(std::f32::NAN, 1.0, 2.0).is_valid());
        assert!(!RGBSpectrum::new(std::f32::INFINITY, 1.0, 2.0).is_valid());
    }
}
