//! Freeform polylines: fixed-count resampling, placement into the node box
//! and clipping against a container's bounds.

use crate::color::Color;
use crate::math::{non_degenerate, BoundingBox, Dimensions, Vector2};

/// How control points relate to the node's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PointMapping {
    /// Points are in the node's baseline box coordinates and stretch with it.
    #[default]
    Local,
    /// Points are in arbitrary world units; their own bounding box is
    /// stretched onto the node box.
    FitToBox,
}

/// Resamples `points` to exactly `count` points by linear interpolation over
/// a uniform parameter `t ∈ [0, 1]`, one control segment per equal slice of `t`.
///
/// The first and last output points are the first and last input points.
/// A single input point is repeated; an empty input stays empty.
pub fn resample(points: &[Vector2], count: usize) -> Vec<Vector2> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };
    if points.len() == 1 || count < 2 {
        return vec![first; count];
    }

    let segments = (points.len() - 1) as f32;
    let steps = (count - 1) as f32;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f32 / steps * segments;
        let index = (t.floor() as usize).min(points.len() - 2);
        let frac = t - index as f32;
        let (a, b) = (points[index], points[index + 1]);
        out.push(a + (b - a) * frac);
    }
    out[0] = first;
    out[count - 1] = last;
    out
}

/// Splits `points` into the runs that lie inside `bounds`.
///
/// A point outside ends the current run, so a line leaving and re-entering
/// the box becomes separate runs instead of one line bridging the gap.
/// Runs shorter than two points cannot be drawn and are dropped.
pub fn clip_runs(points: impl IntoIterator<Item = Vector2>, bounds: BoundingBox) -> Vec<Vec<Vector2>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        if bounds.contains(point) {
            current.push(point);
        } else if !current.is_empty() {
            let run = std::mem::take(&mut current);
            if run.len() >= 2 {
                runs.push(run);
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}

/// A stroked line through control points, redrawn at a constant point count.
#[derive(Debug, Clone)]
pub struct Polyline {
    control: Vec<Vector2>,
    color: Color,
    base_thickness: f32,
    mapping: PointMapping,
    resample_count: Option<usize>,
    resampled: Vec<Vector2>,
    /// Resampled points placed in the current box, relative to the node origin.
    placed: Vec<Vector2>,
    thickness: f32,
}

impl Polyline {
    pub fn new<P: Into<Vector2>>(points: impl IntoIterator<Item = P>) -> Self {
        Self {
            control: points.into_iter().map(Into::into).collect(),
            color: Color::WHITE,
            base_thickness: 1.0,
            mapping: PointMapping::Local,
            resample_count: None,
            resampled: Vec::new(),
            placed: Vec::new(),
            thickness: 1.0,
        }
    }

    #[inline]
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Line thickness at the baseline box size.
    #[inline]
    pub fn thickness(mut self, thickness: f32) -> Self {
        self.base_thickness = thickness;
        self.thickness = thickness;
        self
    }

    #[inline]
    pub fn mapping(mut self, mapping: PointMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Overrides the scene-wide resample count for this line.
    #[inline]
    pub fn resample_count(mut self, count: usize) -> Self {
        self.resample_count = Some(count);
        self
    }

    pub fn control_points(&self) -> &[Vector2] {
        &self.control
    }

    pub fn resampled_points(&self) -> &[Vector2] {
        &self.resampled
    }

    /// Points placed in the node's current box, relative to its origin.
    pub fn placed_points(&self) -> &[Vector2] {
        &self.placed
    }

    pub fn current_thickness(&self) -> f32 {
        self.thickness
    }

    pub fn stroke_color(&self) -> Color {
        self.color
    }

    pub fn point_mapping(&self) -> PointMapping {
        self.mapping
    }

    /// Fixes the resample count (if the line had none) and builds the
    /// resampled buffer. Called once when the line joins a scene.
    pub(crate) fn prepare(&mut self, default_count: usize) {
        let count = *self.resample_count.get_or_insert(default_count);
        if self.control.len() < 2 {
            tracing::warn!(points = self.control.len(), "polyline has fewer than 2 control points");
        }
        self.resampled = resample(&self.control, count);
    }

    pub(crate) fn set_control_points(&mut self, points: Vec<Vector2>) {
        self.control = points;
        let count = self.resample_count.unwrap_or(self.resampled.len());
        self.resampled = resample(&self.control, count);
    }

    /// Re-places the resampled points for a box of `size`, scaled by `scale`
    /// from its baseline, and rescales the thickness.
    pub(crate) fn refit(&mut self, scale: Vector2, size: Dimensions, min_stroke: f32) {
        self.thickness = (self.base_thickness * scale.min_element()).max(min_stroke);
        self.placed = match self.mapping {
            PointMapping::Local => self
                .resampled
                .iter()
                .map(|p| Vector2::new(p.x * scale.x, p.y * scale.y))
                .collect(),
            PointMapping::FitToBox => {
                let Some(extent) = BoundingBox::enclosing(&self.control) else {
                    self.placed.clear();
                    return;
                };
                if extent.width.abs() < crate::math::EPSILON || extent.height.abs() < crate::math::EPSILON {
                    tracing::warn!(?extent, "fitting a polyline with a zero-extent bounding box");
                }
                let range = Vector2::new(non_degenerate(extent.width), non_degenerate(extent.height));
                self.resampled
                    .iter()
                    .map(|p| {
                        Vector2::new(
                            (p.x - extent.x) / range.x * size.width,
                            (p.y - extent.y) / range.y * size.height,
                        )
                    })
                    .collect()
            }
        };
    }
}
