//! Spatial types

use serde::{Deserialize, Serialize};

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Exact comparison against the origin, no tolerance
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

/// A 4x4 world matrix as sixteen values, in the order the host reports them
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix4(pub [f64; 16]);

impl Matrix4 {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// A pure translation, with the offset in the last row
    pub fn from_translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.0[12] = t.x;
        m.0[13] = t.y;
        m.0[14] = t.z;
        m
    }

    /// Exact comparison against the identity matrix
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rotate/scale pivot of a node, in world space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub translate: Vec3,
    pub orient: Vec3,
}

impl Pivot {
    pub const ZERO: Self = Self {
        translate: Vec3::ZERO,
        orient: Vec3::ZERO,
    };

    pub fn new(translate: Vec3, orient: Vec3) -> Self {
        Self { translate, orient }
    }

    /// True only when both vectors are exactly zero
    pub fn is_identity(&self) -> bool {
        self.translate.is_zero() && self.orient.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matrix() {
        assert!(Matrix4::IDENTITY.is_identity());
        assert!(Matrix4::default().is_identity());
        assert!(!Matrix4::from_translation(Vec3::new(0.0, 1.0, 0.0)).is_identity());
    }

    #[test]
    fn test_pivot_identity_is_exact() {
        assert!(Pivot::ZERO.is_identity());
        let nudged = Pivot::new(Vec3::new(1e-7, 0.0, 0.0), Vec3::ZERO);
        assert!(!nudged.is_identity());
        let rotated = Pivot::new(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0));
        assert!(!rotated.is_identity());
    }

    #[test]
    fn test_vec3_serializes_as_array() {
        let pivot: Pivot = toml::from_str("translate = [1.0, 2.0, 3.0]\norient = [0.0, 0.0, 0.0]").unwrap();
        assert_eq!(pivot.translate, Vec3::new(1.0, 2.0, 3.0));
        assert!(pivot.orient.is_zero());
    }
}
