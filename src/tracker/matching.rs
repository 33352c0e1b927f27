//! Geometric matching of an observation against previous-frame tracks.

use ndarray::Array1;

use crate::tracker::quad::Quad;

/// Compute IoU of every candidate box against a single query box.
pub fn iou_row(candidates: &[Quad], query: &Quad) -> Array1<f64> {
    candidates.iter().map(|c| c.iou(query)).collect()
}

/// Index of the first candidate whose IoU reaches `thresh`.
///
/// First match in candidate order, not best match: a later candidate with a
/// higher overlap is never considered once an earlier one qualifies.
pub fn first_match(ious: &Array1<f64>, thresh: f64) -> Option<usize> {
    ious.iter().position(|&iou| iou >= thresh)
}
