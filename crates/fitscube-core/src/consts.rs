/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Highest value of an 8-bit display raster.
pub const GRAY_MAX: u8 = 255;

/// Default zoom step bound in each direction.
pub const DEFAULT_MAX_ZOOM_STEPS: i32 = 7;

/// Default scale applied per zoom-in step.
pub const DEFAULT_ZOOM_IN_FACTOR: f32 = 1.25;

/// Default scale applied per zoom-out step.
pub const DEFAULT_ZOOM_OUT_FACTOR: f32 = 0.75;

/// Default minimum percentage change between two progress events.
pub const DEFAULT_PROGRESS_STEP: u8 = 1;
