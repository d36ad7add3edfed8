use std::path::Path;

use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::headers::ReadsKey;
use fitsio::FitsFile;
use ndarray::Array2;

use crate::error::{FitscubeError, Result};
use crate::frame::{FitsInfo, Frame, FrameMetadata};

/// Primary image HDU of an open FITS file.
///
/// Pixels come back from cfitsio as physical values, BZERO/BSCALE applied.
pub struct FitsReader {
    fptr: FitsFile,
    hdu: FitsHdu,
    /// Axis lengths slowest first, so the last entry is NAXIS1 (width).
    shape: Vec<usize>,
}

impl FitsReader {
    pub fn open(path: &Path) -> Result<Self> {
        let mut fptr = FitsFile::open(path)?;
        let hdu = fptr.primary_hdu()?;
        let shape = match &hdu.info {
            HduInfo::ImageInfo { shape, .. } => shape.clone(),
            _ => {
                return Err(FitscubeError::InvalidFits(
                    "primary HDU is not an image".into(),
                ))
            }
        };
        Ok(Self { fptr, hdu, shape })
    }

    /// (width, height) of the single 2-D image in the primary HDU.
    ///
    /// Axes beyond the second are accepted only when they have length 1.
    pub fn image_dimensions(&self) -> Result<(usize, usize)> {
        let unsupported = || FitscubeError::UnsupportedDimensions {
            naxis: self.shape.len(),
            axes: self.shape.iter().rev().copied().collect(),
        };
        let [extra @ .., height, width] = self.shape.as_slice() else {
            return Err(unsupported());
        };
        if *width == 0 || *height == 0 || extra.iter().any(|&n| n != 1) {
            return Err(unsupported());
        }
        Ok((*width, *height))
    }

    pub fn bitpix(&mut self) -> Result<i64> {
        Ok(self.hdu.read_key::<i64>(&mut self.fptr, "BITPIX")?)
    }

    /// Optional header keyword; missing or mistyped keys read as `None`.
    pub fn key<T: ReadsKey>(&mut self, name: &str) -> Option<T> {
        self.hdu.read_key(&mut self.fptr, name).ok()
    }

    /// Byte size of the stored data array.
    pub fn data_byte_size(&mut self) -> Result<usize> {
        let (width, height) = self.image_dimensions()?;
        let bytes_per_sample = (self.bitpix()?.unsigned_abs() / 8) as usize;
        Ok(width * height * bytes_per_sample)
    }

    /// Decode the primary image into a frame of physical values.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let (width, height) = self.image_dimensions()?;
        let bitpix = self.bitpix()?;
        let pixels: Vec<f64> = self.hdu.read_image(&mut self.fptr)?;
        let data = Array2::from_shape_vec((height, width), pixels).map_err(|e| {
            FitscubeError::InvalidFits(format!("pixel data does not fill {width}x{height}: {e}"))
        })?;

        let mut frame = Frame::new(data);
        frame.metadata = FrameMetadata {
            frame_index: 0,
            source: None,
            bitpix,
        };
        Ok(frame)
    }

    /// Header summary for display.
    pub fn info(&mut self, path: &Path) -> Result<FitsInfo> {
        let (width, height) = self.image_dimensions()?;
        Ok(FitsInfo {
            filename: path.to_path_buf(),
            width,
            height,
            bitpix: self.bitpix()?,
            bzero: self.key("BZERO").unwrap_or(0.0),
            bscale: self.key("BSCALE").unwrap_or(1.0),
            object: self.text_key("OBJECT"),
            telescope: self.text_key("TELESCOP"),
            instrument: self.text_key("INSTRUME"),
            date_obs: self.text_key("DATE-OBS"),
            exposure: self.key("EXPOSURE").or_else(|| self.key("EXPTIME")),
        })
    }

    fn text_key(&mut self, name: &str) -> Option<String> {
        self.key::<String>(name)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Open `path` and decode its primary image.
pub fn read_frame(path: &Path) -> Result<Frame> {
    let mut frame = FitsReader::open(path)?.read_frame()?;
    frame.metadata.source = Some(path.to_path_buf());
    Ok(frame)
}
