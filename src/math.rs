use std::ops::{Add, AddAssign, Mul, Sub};

/// Smallest extent used as a divisor. Degenerate boxes and point sets are
/// widened to this instead of producing NaN coordinates.
pub const EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Smaller of the two components.
    pub fn min_element(self) -> f32 {
        self.x.min(self.y)
    }

    /// Clamps each axis to `[-bound, +bound]` of the matching axis of `bound`.
    pub fn clamp_symmetric(self, bound: Vector2) -> Self {
        Self::new(self.x.clamp(-bound.x, bound.x), self.y.clamp(-bound.y, bound.y))
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Per-axis multiplication.
    pub fn scale(self, sx: f32, sy: f32) -> Self {
        Self::new(self.width * sx, self.height * sy)
    }

    /// Per-axis ratio `self / other`, with `other` widened to [`EPSILON`].
    pub fn ratio_to(self, other: Dimensions) -> Vector2 {
        Vector2::new(self.width / non_degenerate(other.width), self.height / non_degenerate(other.height))
    }

    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }
}

impl From<(f32, f32)> for Dimensions {
    fn from(value: (f32, f32)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Vector2, size: Dimensions) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Smallest box holding every point, or `None` for an empty slice.
    pub fn enclosing(points: &[Vector2]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

/// Widens a near-zero extent to [`EPSILON`], keeping its sign.
pub fn non_degenerate(extent: f32) -> f32 {
    if extent.abs() < EPSILON {
        EPSILON
    } else {
        extent
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let bb = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        assert!(bb.contains(Vector2::new(10.0, 10.0)));
        assert!(bb.contains(Vector2::new(30.0, 30.0)));
        assert!(!bb.contains(Vector2::new(30.1, 15.0)));
    }

    #[test]
    fn ratio_never_divides_by_zero() {
        let r = Dimensions::new(10.0, 10.0).ratio_to(Dimensions::new(0.0, 5.0));
        assert!(r.x.is_finite());
        assert_eq!(r.y, 2.0);
    }

    #[test]
    fn enclosing_box() {
        let pts = [Vector2::new(3.0, -1.0), Vector2::new(-2.0, 4.0), Vector2::new(1.0, 1.0)];
        assert_eq!(BoundingBox::enclosing(&pts), Some(BoundingBox::new(-2.0, -1.0, 5.0, 5.0)));
        assert_eq!(BoundingBox::enclosing(&[]), None);
    }
}
