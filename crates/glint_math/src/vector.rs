//! Vector helpers used by the tracer on top of `glam::Vec3`.

use crate::Vec3;
use thiserror::Error;

/// Components smaller than this (in absolute value) count as zero.
pub const NEAR_ZERO_EPSILON: f32 = 1e-6;

/// Extension trait for Vec3 with the ray tracing vocabulary.
pub trait Vec3Ext {
    /// True when every component is within [`NEAR_ZERO_EPSILON`] of zero.
    fn near_zero(&self) -> bool;

    /// Component by axis index (0=X, 1=Y, 2=Z).
    ///
    /// Panics on any other index.
    fn axis(&self, index: usize) -> f32;

    /// Divide by the length without any zero check.
    ///
    /// A zero vector yields NaN components; callers keep inputs non-zero.
    fn unit(&self) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().cmplt(Vec3::splat(NEAR_ZERO_EPSILON)).all()
    }

    #[inline]
    fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis index {index} out of range, expected 0 (X), 1 (Y) or 2 (Z)"),
        }
    }

    #[inline]
    fn unit(&self) -> Vec3 {
        *self / self.length()
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices on either side
/// (Snell's law). The caller is responsible for detecting total internal
/// reflection first.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}' is not a vector; expected three numbers separated by commas e.g. 1.0,2.0,-2.0")]
pub struct ParseVectorError {
    pub input: String,
}

/// Parse a vector written as `x,y,z`.
///
/// Each component is an optionally negative decimal with an optional
/// fractional part (`-3`, `0.5`, `278`); whitespace and exponents are rejected.
pub fn parse_vec3(input: &str) -> Result<Vec3, ParseVectorError> {
    let err = || ParseVectorError {
        input: input.to_string(),
    };

    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 3 || !parts.iter().all(|p| is_plain_decimal(p)) {
        return Err(err());
    }

    let mut components = [0.0f32; 3];
    for (slot, part) in components.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| err())?;
    }
    Ok(Vec3::from_array(components))
}

fn is_plain_decimal(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (s, None),
    };
    let digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && fraction.map_or(true, digits)
}
