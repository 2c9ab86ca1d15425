//! Box geometry in original-image pixel space.
//!
//! Boxes are stored as corner pairs `(x1, y1, x2, y2)`. The network emits
//! normalized centre/size boxes; [`BoundingBox::from_normalized_center`]
//! converts them against a [`FrameSize`].

use crate::util::math::ratio_or_zero;
use crate::util::{DetPipeError, DetPipeResult};

/// Pixel dimensions of the original image a tensor was computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSize {
    width: f32,
    height: f32,
}

impl FrameSize {
    /// Creates a frame size; both dimensions must be positive and finite.
    pub fn new(width: f32, height: f32) -> DetPipeResult<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(DetPipeError::InvalidFrameSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Axis-aligned box given by its top-left and bottom-right corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl BoundingBox {
    /// Creates a box from corner coordinates.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Converts a normalized centre/size box into pixel corners.
    pub fn from_normalized_center(cx: f32, cy: f32, w: f32, h: f32, frame: FrameSize) -> Self {
        let half_w = w / 2.0;
        let half_h = h / 2.0;
        Self {
            x1: (cx - half_w) * frame.width,
            y1: (cy - half_h) * frame.height,
            x2: (cx + half_w) * frame.width,
            y2: (cy + half_h) * frame.height,
        }
    }

    /// Returns the box width.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the box height.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Returns the box area in square pixels.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns true when every corner lies within `[0, width] x [0, height]`.
    ///
    /// Edges touching the frame border count as inside.
    pub fn is_within(&self, frame: FrameSize) -> bool {
        self.x1 >= 0.0 && self.y1 >= 0.0 && self.x2 <= frame.width && self.y2 <= frame.height
    }

    /// Area of the overlap rectangle, `0.0` for disjoint boxes.
    pub fn intersection_area(&self, other: &BoundingBox) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);
        (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0)
    }

    /// Intersection over union with `other`.
    ///
    /// An empty union (two zero-area boxes) yields `0.0` rather than NaN.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        ratio_or_zero(inter, union)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundingBox, FrameSize};
    use crate::DetPipeError;

    #[test]
    fn frame_size_rejects_non_positive_dimensions() {
        assert_eq!(
            FrameSize::new(0.0, 10.0).err(),
            Some(DetPipeError::InvalidFrameSize {
                width: 0.0,
                height: 10.0,
            })
        );
        assert!(FrameSize::new(10.0, -1.0).is_err());
        assert!(FrameSize::new(f32::NAN, 10.0).is_err());
        assert!(FrameSize::new(640.0, 480.0).is_ok());
    }

    #[test]
    fn from_normalized_center_scales_by_frame() {
        let frame = FrameSize::new(200.0, 100.0).unwrap();
        let bbox = BoundingBox::from_normalized_center(0.5, 0.5, 0.5, 0.5, frame);
        assert_eq!(bbox, BoundingBox::new(50.0, 25.0, 150.0, 75.0));
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 50.0);
        assert_eq!(bbox.area(), 5000.0);
    }

    #[test]
    fn is_within_accepts_edges_and_rejects_overhang() {
        let frame = FrameSize::new(100.0, 100.0).unwrap();
        assert!(BoundingBox::new(0.0, 0.0, 100.0, 100.0).is_within(frame));
        assert!(!BoundingBox::new(-1.0, 0.0, 50.0, 50.0).is_within(frame));
        assert!(!BoundingBox::new(0.0, 0.0, 50.0, 101.0).is_within(frame));
    }

    #[test]
    fn iou_matches_reference_cases() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);

        let disjoint = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.iou(&disjoint), 0.0);

        let half = BoundingBox::new(0.0, 0.0, 10.0, 5.0);
        assert!((a.iou(&half) - 0.5).abs() < 1e-6);
        assert!((half.iou(&a) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn iou_of_zero_area_boxes_is_zero() {
        let p = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
        let q = BoundingBox::new(7.0, 7.0, 7.0, 7.0);
        assert_eq!(p.iou(&q), 0.0);
        assert_eq!(p.iou(&p), 0.0);
    }
}
