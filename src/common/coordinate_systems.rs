use std::str::FromStr;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::MaterializeError;

/// Coordinate convention of the record source.
///
/// `ZBack` is the right-handed Z-up to Y-up remap: the source's Z axis
/// becomes the runtime's Y axis and the source's Y axis ends up pointing
/// backwards, hence the sign flip on the third component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Convention {
    #[default]
    Identity,
    ZBack,
}

impl FromStr for Convention {
    type Err = MaterializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(Convention::Identity),
            "z-back" => Ok(Convention::ZBack),
            other => Err(MaterializeError::Config {
                reason: format!("unknown coordinate convention \"{other}\""),
            }),
        }
    }
}

/// Source convention plus uniform scale, fixed for one materialization
/// call. Every mapping is applied exactly once, at record conversion; the
/// resolver never re-applies it to sub-objects it patches in.
#[derive(Debug, Clone, Copy)]
pub struct SourceSpace {
    convention: Convention,
    scale: f32,
}

impl SourceSpace {
    pub fn new(convention: Convention, scale: f32) -> Result<Self, MaterializeError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MaterializeError::Config {
                reason: format!("scale must be a positive finite number, got {scale}"),
            });
        }
        Ok(Self { convention, scale })
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    #[inline]
    pub fn point(&self, source: Vec3) -> Vec3 {
        let p = source / self.scale;
        match self.convention {
            Convention::Identity => p,
            Convention::ZBack => Vec3::new(p.x, p.z, -p.y),
        }
    }

    /// Euler angles swap like points but carry no length unit, so the
    /// uniform scale does not apply.
    #[inline]
    pub fn euler(&self, source: Vec3) -> Vec3 {
        match self.convention {
            Convention::Identity => source,
            Convention::ZBack => Vec3::new(source.x, source.z, -source.y),
        }
    }

    /// The vector part transforms like a direction, `w` is untouched.
    #[inline]
    pub fn quaternion(&self, source: Quat) -> Quat {
        match self.convention {
            Convention::Identity => source,
            Convention::ZBack => Quat::from_xyzw(source.x, source.z, -source.y, source.w),
        }
    }

    /// Scale components are per-axis magnitudes: the axes swap, signs and
    /// the uniform scale stay out of it.
    #[inline]
    pub fn scale_triple(&self, source: Vec3) -> Vec3 {
        match self.convention {
            Convention::Identity => source,
            Convention::ZBack => Vec3::new(source.x, source.z, source.y),
        }
    }

    /// Remaps a flat position buffer, three components per vertex, in one
    /// linear pass. Under `ZBack` a trailing partial triple is left as-is.
    pub fn positions_in_place(&self, data: &mut [f32]) {
        match self.convention {
            Convention::Identity => {
                for value in data.iter_mut() {
                    *value /= self.scale;
                }
            }
            Convention::ZBack => {
                for triple in data.chunks_exact_mut(3) {
                    let (x, y, z) = (triple[0], triple[1], triple[2]);
                    triple[0] = x / self.scale;
                    triple[1] = z / self.scale;
                    triple[2] = -y / self.scale;
                }
            }
        }
    }
}
