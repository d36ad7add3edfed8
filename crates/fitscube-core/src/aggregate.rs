use ndarray::{s, Array2};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::{FitscubeError, Result};
use crate::frame::{Frame, FrameStack};
use crate::region::Region;
use crate::store::FrameStore;

/// Sum of intensities inside `region` for one frame.
///
/// The region is clamped to the frame first; an empty intersection sums to 0.
pub fn region_sum(region: &Region, data: &Array2<f64>) -> f64 {
    let (h, w) = data.dim();
    let r = region.clamp(w, h);
    if r.is_empty() {
        return 0.0;
    }
    data.slice(s![r.y_min..r.y_max, r.x_min..r.x_max]).sum()
}

/// Per-frame region sums across the whole stack, in stack order.
pub fn aggregate(region: &Region, stack: &FrameStack) -> Vec<f64> {
    let frames = stack.frames();
    let sum = |f: &Frame| region_sum(region, &f.data);

    if frames.len() >= PARALLEL_FRAME_THRESHOLD {
        frames.par_iter().map(sum).collect()
    } else {
        frames.iter().map(sum).collect()
    }
}

/// Output of a spectrum request, as handed to plotting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpectrumReport {
    pub x_range: [usize; 2],
    pub y_range: [usize; 2],
    pub frame_index: usize,
    pub series: Vec<f64>,
}

impl SpectrumReport {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Index and value of the largest finite entry.
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.series
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .fold(None, |best, (i, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
    }
}

/// Compute the aggregate series for `region` over the loaded stack.
///
/// Fails with [`FitscubeError::NotReady`] unless a load has completed, and
/// with [`FitscubeError::InvalidRegion`] when the clamped region is empty.
pub fn spectrum(store: &FrameStore, region: &Region, frame_index: usize) -> Result<SpectrumReport> {
    let stack = store.ready()?;
    if frame_index >= stack.len() {
        return Err(FitscubeError::FrameIndexOutOfRange {
            index: frame_index,
            total: stack.len(),
        });
    }

    let region = match stack.dimensions() {
        Some((w, h)) => region.clamp(w, h),
        None => *region,
    };
    if region.is_empty() {
        return Err(FitscubeError::InvalidRegion(format!(
            "{region} covers no pixels"
        )));
    }
    info!("Spectrum region {region} at frame {frame_index}");

    Ok(SpectrumReport {
        x_range: region.x_range(),
        y_range: region.y_range(),
        frame_index,
        series: aggregate(&region, stack),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_excludes_the_maxima() {
        let data = Array2::from_shape_fn((3, 3), |(r, c)| (r * 3 + c) as f64);
        // rows 0..2, cols 1..3 -> 1 + 2 + 4 + 5
        assert_eq!(region_sum(&Region::new(1, 3, 0, 2), &data), 12.0);
    }

    #[test]
    fn region_outside_frame_sums_to_zero() {
        let data = Array2::from_elem((2, 2), 1.0f64);
        assert_eq!(region_sum(&Region::new(5, 9, 5, 9), &data), 0.0);
    }

    #[test]
    fn peak_skips_non_finite() {
        let report = SpectrumReport {
            x_range: [0, 1],
            y_range: [0, 1],
            frame_index: 0,
            series: vec![1.0, f64::NAN, 3.0, 2.0],
        };
        assert_eq!(report.peak(), Some((2, 3.0)));
    }
}
