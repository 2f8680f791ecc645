//! Conversion between normalized simulation space and display pixels.
//!
//! The simulation lives in the unit square with its origin at the bottom-left
//! corner. Display surfaces count pixels from the top-left corner, so vertical
//! positions are flipped on the way out. Sizes are never flipped.
//!
//! All conversions round half away from zero, independently per axis.
//!
//! ```ignore
//! let mapper = CoordMapper::new(100, 100)?;
//! assert_eq!(mapper.to_px_point(DVec2::new(0.5, 0.25)), I64Vec2::new(50, 75));
//! assert_eq!(mapper.to_px_size(DVec2::new(0.5, 0.25))?, I64Vec2::new(50, 25));
//! ```

use crate::error::EruptionError;
use glam::{DVec2, I64Vec2, UVec2};

/// Maps normalized coordinates onto a display surface of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordMapper {
    width: u32,
    height: u32,
}

impl CoordMapper {
    /// Create a mapper for a `width` x `height` pixel surface.
    pub fn new(width: u32, height: u32) -> Result<Self, EruptionError> {
        if width == 0 || height == 0 {
            return Err(EruptionError::InvalidDimension(format!(
                "surface size must be non-zero, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// Surface size in pixels.
    pub fn surface_size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Horizontal pixel coordinate of a normalized x value.
    #[inline]
    pub fn to_px_x(&self, u: f64) -> i64 {
        (u * self.width as f64).round() as i64
    }

    /// Vertical pixel coordinate of a normalized y value (flipped).
    #[inline]
    pub fn to_px_y(&self, u: f64) -> i64 {
        ((1.0 - u) * self.height as f64).round() as i64
    }

    /// Pixel position of a normalized point.
    #[inline]
    pub fn to_px_point(&self, point: DVec2) -> I64Vec2 {
        I64Vec2::new(self.to_px_x(point.x), self.to_px_y(point.y))
    }

    /// Pixel position of an externally supplied coordinate pair.
    ///
    /// Fails with [`EruptionError::InvalidDimension`] unless `coords` holds
    /// exactly two values.
    pub fn to_px_point_slice(&self, coords: &[f64]) -> Result<I64Vec2, EruptionError> {
        vec2_from_slice(coords).map(|p| self.to_px_point(p))
    }

    /// Pixel dimensions of a normalized size. No vertical flip.
    pub fn to_px_size(&self, size: DVec2) -> Result<I64Vec2, EruptionError> {
        let size = check_normalized_size(size)?;
        Ok(I64Vec2::new(
            self.to_px_x(size.x),
            (size.y * self.height as f64).round() as i64,
        ))
    }

    /// Pixel rectangle of `size_px` centered on a normalized point.
    pub fn rect(&self, center: DVec2, size_px: I64Vec2) -> PixelRect {
        PixelRect::from_center(self.to_px_point(center), size_px)
    }
}

/// Axis-aligned rectangle in pixel space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelRect {
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self { left, top, width, height }
    }

    /// Rectangle of the given size whose center is `center`.
    ///
    /// Odd sizes put the extra pixel on the right/bottom side.
    pub fn from_center(center: I64Vec2, size: I64Vec2) -> Self {
        Self {
            left: center.x - size.x / 2,
            top: center.y - size.y / 2,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> i64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.top + self.height
    }

    pub fn center(&self) -> I64Vec2 {
        I64Vec2::new(self.left + self.width / 2, self.top + self.height / 2)
    }

    pub fn size(&self) -> I64Vec2 {
        I64Vec2::new(self.width, self.height)
    }
}

/// Region of normalized space in which particles stay alive.
///
/// The top edge is open: a particle may arc above the visible area and fall
/// back in, so only the floor and the side walls cull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// The unit square.
    pub const UNIT: Bounds = Bounds {
        min: DVec2::ZERO,
        max: DVec2::ONE,
    };

    /// Whether a particle at `position` has left the bounds.
    #[inline]
    pub fn is_outside(&self, position: DVec2) -> bool {
        position.y < self.min.y || position.x < self.min.x || position.x > self.max.x
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::UNIT
    }
}

/// Build a vector from an externally supplied slice of exactly two values.
pub fn vec2_from_slice(values: &[f64]) -> Result<DVec2, EruptionError> {
    match values {
        [x, y] => Ok(DVec2::new(*x, *y)),
        _ => Err(EruptionError::InvalidDimension(format!(
            "expected 2 components, got {}",
            values.len()
        ))),
    }
}

/// Reject normalized sizes with a component outside `[0, 1]`.
pub fn check_normalized_size(size: DVec2) -> Result<DVec2, EruptionError> {
    let in_range = |v: f64| (0.0..=1.0).contains(&v);
    if in_range(size.x) && in_range(size.y) {
        Ok(size)
    } else {
        Err(EruptionError::InvalidDimension(format!(
            "normalized size ({}, {}) must lie within [0, 1]",
            size.x, size.y
        )))
    }
}
