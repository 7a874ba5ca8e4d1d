//! Nine-way anchors and the resolver that keeps an anchor's reference point
//! stable while a box changes size.

use std::fmt;
use std::str::FromStr;

use crate::align::{AlignX, AlignY};
use crate::errors::Error;
use crate::math::{BoundingBox, Dimensions, Vector2};

/// Named reference point on a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
    LeftCenter,
    RightCenter,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::Center,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::TopCenter,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::BottomCenter,
        Anchor::LeftCenter,
        Anchor::RightCenter,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::TopLeft => "top_left",
            Anchor::TopRight => "top_right",
            Anchor::TopCenter => "top_center",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomRight => "bottom_right",
            Anchor::BottomCenter => "bottom_center",
            Anchor::LeftCenter => "left_center",
            Anchor::RightCenter => "right_center",
        }
    }

    /// The horizontal and vertical reference lines this anchor sits on.
    pub const fn align(self) -> (AlignX, AlignY) {
        match self {
            Anchor::Center => (AlignX::CenterX, AlignY::CenterY),
            Anchor::TopLeft => (AlignX::Left, AlignY::Top),
            Anchor::TopRight => (AlignX::Right, AlignY::Top),
            Anchor::TopCenter => (AlignX::CenterX, AlignY::Top),
            Anchor::BottomLeft => (AlignX::Left, AlignY::Bottom),
            Anchor::BottomRight => (AlignX::Right, AlignY::Bottom),
            Anchor::BottomCenter => (AlignX::CenterX, AlignY::Bottom),
            Anchor::LeftCenter => (AlignX::Left, AlignY::CenterY),
            Anchor::RightCenter => (AlignX::Right, AlignY::CenterY),
        }
    }

    fn factors(self) -> Vector2 {
        let (x, y) = self.align();
        Vector2::new(x.factor(), y.factor())
    }

    /// This anchor's reference point on `bounds`.
    pub fn point_on(self, bounds: BoundingBox) -> Vector2 {
        let f = self.factors();
        Vector2::new(bounds.x + f.x * bounds.width, bounds.y + f.y * bounds.height)
    }

    /// Origin of a box of `size` whose reference point lands on the
    /// baseline box's reference point scaled by `(scale_x, scale_y)`.
    ///
    /// Only `baseline` is scaled; `size` is taken as-is so zoomed sizes
    /// resolve the same way as plain rescaled ones.
    pub fn resolve(self, baseline: BoundingBox, scale_x: f32, scale_y: f32, size: Dimensions) -> Vector2 {
        let f = self.factors();
        let reference = self.point_on(baseline);
        Vector2::new(
            reference.x * scale_x - f.x * size.width,
            reference.y * scale_y - f.y * size.height,
        )
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.name() == s)
            .ok_or_else(|| Error::UnknownAnchor(s.to_owned()))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_every_name() {
        for anchor in Anchor::ALL {
            assert_eq!(anchor.name().parse::<Anchor>(), Ok(anchor));
        }
    }

    #[test]
    fn rejects_unknown_name() {
        assert_eq!(
            "middle".parse::<Anchor>(),
            Err(Error::UnknownAnchor("middle".to_owned()))
        );
    }

    #[test]
    fn resolve_keeps_scaled_reference_point() {
        let baseline = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        let size = Dimensions::new(300.0, 150.0);
        for anchor in Anchor::ALL {
            let origin = anchor.resolve(baseline, 3.0, 3.0, size);
            let got = anchor.point_on(BoundingBox::from_parts(origin, size));
            let want = anchor.point_on(baseline) * 3.0;
            assert!((got.x - want.x).abs() < 1e-3, "{anchor}: {got:?} vs {want:?}");
            assert!((got.y - want.y).abs() < 1e-3, "{anchor}: {got:?} vs {want:?}");
        }
    }

    #[test]
    fn top_left_is_the_minimum_corner() {
        let bb = BoundingBox::new(5.0, 7.0, 10.0, 20.0);
        assert_eq!(Anchor::TopLeft.point_on(bb), Vector2::new(5.0, 7.0));
        assert_eq!(Anchor::BottomRight.point_on(bb), Vector2::new(15.0, 27.0));
    }
}
