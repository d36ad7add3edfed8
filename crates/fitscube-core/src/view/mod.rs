mod normalize;
mod transform;

pub use normalize::{finite_range, normalize, normalize_view, Contrast, GrayRaster};
pub use transform::{fit_scale, ViewTransform, ZoomState};
