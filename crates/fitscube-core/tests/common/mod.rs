#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const BLOCK: usize = 2880;
const CARD: usize = 80;

/// Pixel payload for a synthetic FITS file, row-major.
pub enum Samples<'a> {
    U8(&'a [u8]),
    I16(&'a [i16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl Samples<'_> {
    fn bitpix(&self) -> i64 {
        match self {
            Self::U8(_) => 8,
            Self::I16(_) => 16,
            Self::I32(_) => 32,
            Self::I64(_) => 64,
            Self::F32(_) => -32,
            Self::F64(_) => -64,
        }
    }

    fn to_be_bytes(&self) -> Vec<u8> {
        match self {
            Self::U8(v) => v.to_vec(),
            Self::I16(v) => v.iter().flat_map(|x| x.to_be_bytes()).collect(),
            Self::I32(v) => v.iter().flat_map(|x| x.to_be_bytes()).collect(),
            Self::I64(v) => v.iter().flat_map(|x| x.to_be_bytes()).collect(),
            Self::F32(v) => v.iter().flat_map(|x| x.to_be_bytes()).collect(),
            Self::F64(v) => v.iter().flat_map(|x| x.to_be_bytes()).collect(),
        }
    }
}

/// One 80-column header card `KEYWORD = value`.
pub fn card(keyword: &str, value: &str) -> String {
    let text = format!("{keyword:<8}= {value:>20}");
    format!("{text:<80}")
}

/// Assemble a complete single-HDU FITS file in memory.
///
/// `extra` cards are inserted before `END` verbatim (already formatted).
pub fn build_fits_with(width: usize, height: usize, samples: Samples, extra: &[String]) -> Vec<u8> {
    let mut header = String::new();
    header.push_str(&card("SIMPLE", "T"));
    header.push_str(&card("BITPIX", &samples.bitpix().to_string()));
    header.push_str(&card("NAXIS", "2"));
    header.push_str(&card("NAXIS1", &width.to_string()));
    header.push_str(&card("NAXIS2", &height.to_string()));
    for c in extra {
        header.push_str(c);
    }
    header.push_str(&format!("{:<80}", "END"));

    let mut buf = header.into_bytes();
    assert_eq!(buf.len() % CARD, 0);
    pad_block(&mut buf, b' ');

    buf.extend(samples.to_be_bytes());
    pad_block(&mut buf, 0);
    buf
}

pub fn build_fits(width: usize, height: usize, samples: Samples) -> Vec<u8> {
    build_fits_with(width, height, samples, &[])
}

/// 32-bit float frame from a row-major slice.
pub fn build_f32_fits(width: usize, height: usize, data: &[f32]) -> Vec<u8> {
    build_fits(width, height, Samples::F32(data))
}

fn pad_block(buf: &mut Vec<u8>, fill: u8) {
    let rem = buf.len() % BLOCK;
    if rem != 0 {
        buf.resize(buf.len() + BLOCK - rem, fill);
    }
}

/// Write `files` into a fresh temporary directory, named `frame_000.fits` and so on.
pub fn write_fits_dir(files: &[Vec<u8>]) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().expect("create temp dir");
    let paths = files
        .iter()
        .enumerate()
        .map(|(i, bytes)| write_file(dir.path(), &format!("frame_{i:03}.fits"), bytes))
        .collect();
    (dir, paths)
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write fits file");
    path
}

/// `count` frames of `width` x `height`, frame `k` holding `k * 100 + row * width + col`.
pub fn ramp_stack(count: usize, width: usize, height: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|k| {
            let data: Vec<f32> = (0..width * height)
                .map(|i| (k * 100 + i) as f32)
                .collect();
            build_f32_fits(width, height, &data)
        })
        .collect()
}
