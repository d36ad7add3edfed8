use ndarray::Array2;
use std::path::PathBuf;

/// A single-channel image frame read from one FITS file.
/// Pixel values are physical intensities (BZERO/BSCALE applied).
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f64>,
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array2<f64>) -> Self {
        Self {
            data,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    pub frame_index: usize,
    pub source: Option<PathBuf>,
    pub bitpix: i64,
}

/// Header summary of a FITS file.
#[derive(Clone, Debug)]
pub struct FitsInfo {
    pub filename: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bitpix: i64,
    pub bzero: f64,
    pub bscale: f64,
    pub object: Option<String>,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
    pub date_obs: Option<String>,
    pub exposure: Option<f64>,
}

/// Ordered collection of frames, one per file, in directory enumeration order.
#[derive(Clone, Debug, Default)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// (width, height) of the first frame, if any.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.frames.first().map(Frame::dimensions)
    }
}
