/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignX {
    #[default]
    Left,
    CenterX,
    Right,
}

/// Vertical alignment. Screen space is y-down, so `Top` is the smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignY {
    #[default]
    Top,
    CenterY,
    Bottom,
}

impl AlignX {
    /// Fraction of the width between the left edge and this reference line.
    pub const fn factor(self) -> f32 {
        match self {
            AlignX::Left => 0.0,
            AlignX::CenterX => 0.5,
            AlignX::Right => 1.0,
        }
    }
}

impl AlignY {
    /// Fraction of the height between the top edge and this reference line.
    pub const fn factor(self) -> f32 {
        match self {
            AlignY::Top => 0.0,
            AlignY::CenterY => 0.5,
            AlignY::Bottom => 1.0,
        }
    }
}
