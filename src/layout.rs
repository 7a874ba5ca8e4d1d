use crate::math::{BoundingBox, Dimensions};

/// Unit the four sides of a [`Margin`] are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MarginUnit {
    /// Absolute pixels of the baseline frame.
    #[default]
    Pixels,
    /// Fractions (`0.0..=1.0`) of the frame's matching dimension.
    Fraction,
}

/// Places a box inside a frame by the space left around it on each side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub unit: MarginUnit,
}

impl Margin {
    /// Pixel margins.
    pub fn px(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            unit: MarginUnit::Pixels,
        }
    }

    /// Fractional margins; `0.1` leaves a tenth of the frame on that side.
    pub fn fraction(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            unit: MarginUnit::Fraction,
        }
    }

    /// The same margin on all sides.
    pub fn all(value: f32, unit: MarginUnit) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
            unit,
        }
    }

    /// Frame-relative bounds of the box this margin leaves.
    pub fn bounds_in(&self, frame: Dimensions) -> BoundingBox {
        let (sx, sy) = match self.unit {
            MarginUnit::Pixels => (1.0, 1.0),
            MarginUnit::Fraction => (frame.width, frame.height),
        };
        let left = self.left * sx;
        let right = self.right * sx;
        let top = self.top * sy;
        let bottom = self.bottom * sy;
        BoundingBox::new(left, top, frame.width - left - right, frame.height - top - bottom)
    }
}

impl From<(f32, f32, f32, f32)> for Margin {
    /// Pixel margins from a `(top, bottom, left, right)` tuple.
    fn from((top, bottom, left, right): (f32, f32, f32, f32)) -> Self {
        Self::px(top, bottom, left, right)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fractional_margin() {
        let bounds = Margin::fraction(0.1, 0.1, 0.05, 0.05).bounds_in(Dimensions::new(1280.0, 720.0));
        assert_eq!(bounds.x, 64.0);
        assert_eq!(bounds.y, 72.0);
        assert!((bounds.width - 1152.0).abs() < 1e-3);
        assert!((bounds.height - 576.0).abs() < 1e-3);
    }

    #[test]
    fn pixel_margin_from_tuple() {
        let bounds = Margin::from((20.0, 150.0, 0.0, 1100.0)).bounds_in(Dimensions::new(1280.0, 720.0));
        assert_eq!(bounds, BoundingBox::new(0.0, 20.0, 180.0, 550.0));
    }
}
