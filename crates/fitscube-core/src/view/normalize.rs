use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::consts::GRAY_MAX;
use crate::frame::Frame;

/// Contrast control value. Subtracted from 255 to get the brightest
/// display level, so 0 uses the full 8-bit range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Contrast(pub u8);

impl Contrast {
    /// Brightest gray level a frame is scaled to.
    pub fn top_level(self) -> u8 {
        GRAY_MAX - self.0
    }
}

/// 8-bit grayscale raster, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayRaster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl GrayRaster {
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.pixels[row * self.width + col]
    }

    /// The raster as intensities, e.g. to feed it back through [`normalize`].
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.height, self.width), |(r, c)| self.get(r, c) as f64)
    }
}

/// Min and max over the finite samples, or `None` if there are none.
pub fn finite_range(data: ArrayView2<f64>) -> Option<(f64, f64)> {
    data.iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Min-max scale `frame` into `[0, 255 - contrast]`, truncating to integers.
///
/// Every frame is scaled by its own range. A constant frame has no range
/// and renders all zero; non-finite samples render as zero.
pub fn normalize(frame: &Frame, contrast: Contrast) -> GrayRaster {
    normalize_view(frame.data.view(), contrast)
}

pub fn normalize_view(data: ArrayView2<f64>, contrast: Contrast) -> GrayRaster {
    let (height, width) = data.dim();
    let top = contrast.top_level();

    let range = finite_range(data).filter(|(lo, hi)| hi > lo);
    let pixels = match range {
        None => vec![0u8; width * height],
        Some((lo, hi)) => {
            let span = hi - lo;
            let top_f = top as f64;
            data.iter()
                .map(|&v| {
                    if !v.is_finite() {
                        0
                    } else if v >= hi {
                        top
                    } else {
                        ((v - lo) * top_f / span).clamp(0.0, top_f) as u8
                    }
                })
                .collect()
        }
    };

    GrayRaster {
        width,
        height,
        pixels,
    }
}
