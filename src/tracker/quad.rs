use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Quadrilateral as reported by the recognition engine.
///
/// Eight values `(x0, y0, x1, y1, x2, y2, x3, y3)`, corners in the engine's
/// order. For an upright box the corners run top-left, top-right,
/// bottom-right, bottom-left, which is what the accessors below rely on:
/// - `q[0]`, `q[1]`: left edge x, top edge y
/// - `q[2]`: right edge x (top-right corner)
/// - `q[4]`, `q[5]`: bottom-right corner
/// - `q[7]`: bottom edge y (bottom-left corner)
///
/// The index scheme is part of the upstream geometry contract; do not
/// renumber it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Quad([f64; 8]);

impl Quad {
    /// Number of values in an engine quadrilateral.
    pub const LEN: usize = 8;

    #[inline]
    pub fn new(values: [f64; 8]) -> Self {
        Self(values)
    }

    /// Build an upright quadrilateral from TLBR format (x1, y1, x2, y2).
    #[inline]
    pub fn from_tlbr(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self([x1, y1, x2, y1, x2, y2, x1, y2])
    }

    /// Build from an untrusted slice; anything but exactly eight values is rejected.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; 8] = values.try_into().map_err(|_| Error::MalformedGeometry {
            expected: Self::LEN,
            got: values.len(),
        })?;
        Ok(Self(values))
    }

    #[inline]
    pub fn values(&self) -> &[f64; 8] {
        &self.0
    }

    /// Convert to TLBR format using the engine index scheme: `[q0, q1, q4, q5]`.
    #[inline]
    pub fn to_tlbr(&self) -> [f64; 4] {
        [self.0[0], self.0[1], self.0[4], self.0[5]]
    }

    /// Centroid used for zone counting: `((q0 + q2) / 2, (q1 + q7) / 2)`.
    #[inline]
    pub fn centroid(&self) -> Point2<f64> {
        Point2::new((self.0[0] + self.0[2]) / 2.0, self.vertical_midpoint())
    }

    /// Vertical midpoint `(q1 + q7) / 2`, the position sampled for speed.
    #[inline]
    pub fn vertical_midpoint(&self) -> f64 {
        (self.0[1] + self.0[7]) / 2.0
    }

    /// Area of the box: `(q2 - q0) * (q7 - q1)`.
    #[inline]
    pub fn area(&self) -> f64 {
        (self.0[2] - self.0[0]) * (self.0[7] - self.0[1])
    }

    /// Intersection over Union with another quadrilateral.
    ///
    /// The intersection extent is taken from corners 0 and 2 (indices 0, 1,
    /// 4, 5) while the areas use indices 0, 1, 2, 7. Both agree for upright
    /// boxes and must stay as they are for skewed ones.
    pub fn iou(&self, other: &Quad) -> f64 {
        let x1 = self.0[0].max(other.0[0]);
        let y1 = self.0[1].max(other.0[1]);
        let x2 = self.0[4].min(other.0[4]);
        let y2 = self.0[5].min(other.0[5]);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }
}

impl TryFrom<Vec<f64>> for Quad {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::from_slice(&values)
    }
}

impl From<Quad> for Vec<f64> {
    fn from(quad: Quad) -> Self {
        quad.0.to_vec()
    }
}

use ndarray::Array2;

/// Calculate IoU matrix between two sets of quadrilaterals.
///
/// Returns a matrix of shape (M, N) where M is the length of `quads_a`
/// and N is the length of `quads_b`.
pub fn iou_batch(quads_a: &[Quad], quads_b: &[Quad]) -> Array2<f64> {
    let mut ious = Array2::zeros((quads_a.len(), quads_b.len()));
    for (i, a) in quads_a.iter().enumerate() {
        for (j, b) in quads_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_tlbr_layout() {
        let quad = Quad::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(
            quad.values(),
            &[10.0, 20.0, 40.0, 20.0, 40.0, 60.0, 10.0, 60.0]
        );
        assert_eq!(quad.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_from_slice_rejects_short_and_long() {
        let err = Quad::from_slice(&[1.0; 7]).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedGeometry {
                expected: 8,
                got: 7
            }
        ));
        assert!(Quad::from_slice(&[1.0; 9]).is_err());
        assert!(Quad::from_slice(&[]).is_err());
        assert!(Quad::from_slice(&[1.0; 8]).is_ok());
    }

    #[test]
    fn test_centroid_and_area() {
        let quad = Quad::from_tlbr(10.0, 20.0, 40.0, 60.0);
        let c = quad.centroid();
        assert_eq!(c.x, 25.0);
        assert_eq!(c.y, 40.0);
        assert_eq!(quad.vertical_midpoint(), 40.0);
        assert_eq!(quad.area(), 1200.0);
    }

    #[test]
    fn test_iou() {
        let a = Quad::from_tlbr(0.0, 0.0, 10.0, 10.0);
        let b = Quad::from_tlbr(5.0, 5.0, 15.0, 15.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        assert_relative_eq!(a.iou(&b), 25.0 / 175.0, epsilon = 1e-12);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = Quad::from_tlbr(0.0, 0.0, 10.0, 10.0);
        let b = Quad::from_tlbr(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_same_box() {
        let a = Quad::from_tlbr(3.0, 7.0, 120.0, 90.0);
        assert_relative_eq!(a.iou(&a), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_iou_degenerate_is_zero() {
        let a = Quad::from_tlbr(5.0, 5.0, 5.0, 5.0);
        assert_eq!(a.iou(&a), 0.0);
    }

    #[test]
    fn test_iou_uses_engine_indices() {
        // Corner 2 pulled left: intersection reads q4, area reads q2.
        let skewed = Quad::new([0.0, 0.0, 10.0, 0.0, 6.0, 10.0, 0.0, 10.0]);
        let upright = Quad::from_tlbr(0.0, 0.0, 10.0, 10.0);
        // inter = 6 * 10 = 60, union = 100 + 100 - 60 = 140
        assert_relative_eq!(skewed.iou(&upright), 60.0 / 140.0, epsilon = 1e-12);
    }

    #[test]
    fn test_iou_batch_is_symmetric() {
        let quads = [
            Quad::from_tlbr(0.0, 0.0, 10.0, 10.0),
            Quad::from_tlbr(4.0, 2.0, 18.0, 9.0),
            Quad::from_tlbr(-3.0, 5.0, 6.0, 30.0),
            Quad::new([1.0, 1.0, 9.0, 2.0, 8.0, 12.0, 0.0, 11.0]),
        ];
        let ious = iou_batch(&quads, &quads);
        assert_eq!(ious.dim(), (4, 4));
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(ious[[i, j]], ious[[j, i]], epsilon = 1e-12);
            }
        }
        // Upright boxes overlap themselves fully; the skewed one does not.
        for i in 0..3 {
            assert_relative_eq!(ious[[i, i]], 1.0, epsilon = 1e-12);
        }
        assert!(ious[[3, 3]] < 1.0);
    }

    #[test]
    fn test_serde_from_engine_array() {
        let quad: Quad = serde_json::from_str("[1, 2, 3, 2, 3, 4, 1, 4]").unwrap();
        assert_eq!(quad, Quad::from_tlbr(1.0, 2.0, 3.0, 4.0));
        assert!(serde_json::from_str::<Quad>("[1, 2, 3]").is_err());
    }
}
