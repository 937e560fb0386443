use std::ops::{Add, Mul, Neg, Sub};

use crate::error::Error;

/// 2-component float vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// 3-component float vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 4-component float vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// See [`Vec3::normalize`] for the failure contract.
    pub fn normalize(self) -> Result<Self, Error> {
        let length = self.length();
        if !length.is_normal() {
            return Err(Error::unnormalizable(length));
        }
        Ok(self * (1.0 / length))
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the unit-length vector pointing in the same direction.
    ///
    /// Fails with [`Error::Domain`] when the length is zero or not finite,
    /// rather than silently producing NaN components.
    pub fn normalize(self) -> Result<Self, Error> {
        let length = self.length();
        if !length.is_normal() {
            return Err(Error::unnormalizable(length));
        }
        Ok(self * (1.0 / length))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// See [`Vec3::normalize`] for the failure contract.
    pub fn normalize(self) -> Result<Self, Error> {
        let length = self.length();
        if !length.is_normal() {
            return Err(Error::unnormalizable(length));
        }
        Ok(self * (1.0 / length))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

macro_rules! impl_vec_ops {
    ($vec:ident { $($field:ident),+ }) => {
        impl Add for $vec {
            type Output = Self;
            fn add(self, other: Self) -> Self {
                Self { $($field: self.$field + other.$field),+ }
            }
        }

        impl Sub for $vec {
            type Output = Self;
            fn sub(self, other: Self) -> Self {
                Self { $($field: self.$field - other.$field),+ }
            }
        }

        impl Mul<f32> for $vec {
            type Output = Self;
            fn mul(self, scalar: f32) -> Self {
                Self { $($field: self.$field * scalar),+ }
            }
        }

        impl Neg for $vec {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

impl_vec_ops!(Vec2 { x, y });
impl_vec_ops!(Vec3 { x, y, z });
impl_vec_ops!(Vec4 { x, y, z, w });

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_vec3_add_sub_scale() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -2.0, 0.5);

        assert_eq!(a + b, Vec3::new(5.0, 0.0, 3.5));
        assert_eq!(a - b, Vec3::new(-3.0, 4.0, 2.5));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_vec3_cross_follows_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);

        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_vec3_normalize_unit_length() {
        let v = Vec3::new(3.0, 4.0, 0.0).normalize().unwrap();

        assert!((v.length() - 1.0).abs() < EPSILON);
        assert!((v.x - 0.6).abs() < EPSILON);
        assert!((v.y - 0.8).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_zero_vector_is_domain_error() {
        let result = Vec3::new(0.0, 0.0, 0.0).normalize();
        assert!(matches!(result, Err(Error::Domain(_))));

        let result = Vec2::new(0.0, 0.0).normalize();
        assert!(matches!(result, Err(Error::Domain(_))));

        let result = Vec4::new(0.0, 0.0, 0.0, 0.0).normalize();
        assert!(matches!(result, Err(Error::Domain(_))));
    }

    #[test]
    fn test_normalize_non_finite_vector_is_domain_error() {
        let result = Vec3::new(f32::NAN, 0.0, 0.0).normalize();
        assert!(matches!(result, Err(Error::Domain(_))));

        let result = Vec3::new(f32::MAX, f32::MAX, 0.0).normalize();
        assert!(matches!(result, Err(Error::Domain(_))));
    }

    #[test]
    fn test_vec2_length() {
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_vec4_dot_and_normalize() {
        let v = Vec4::new(2.0, 0.0, 0.0, 0.0);

        assert_eq!(v.dot(v), 4.0);
        assert_eq!(v.normalize().unwrap(), Vec4::new(1.0, 0.0, 0.0, 0.0));
    }
}
