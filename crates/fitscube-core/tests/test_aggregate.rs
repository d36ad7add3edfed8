mod common;

use approx::assert_relative_eq;
use ndarray::Array2;

use common::{build_f32_fits, build_fits, write_fits_dir, Samples};
use fitscube_core::aggregate::{aggregate, spectrum};
use fitscube_core::config::{LoadPolicy, ViewerConfig};
use fitscube_core::error::FitscubeError;
use fitscube_core::frame::{Frame, FrameStack};
use fitscube_core::loader::load_directory;
use fitscube_core::region::Region;
use fitscube_core::store::FrameStore;

fn stack_of(frames: Vec<Array2<f64>>) -> FrameStack {
    FrameStack::new(frames.into_iter().map(Frame::new).collect())
}

/// Three 4x4 frames where frame k holds `k + 1` everywhere except one
/// marker pixel at (row 1, col 1).
fn three_by_four() -> FrameStack {
    stack_of(
        (0..3)
            .map(|k| {
                let mut a = Array2::from_elem((4, 4), (k + 1) as f64);
                a[[1, 1]] = 10.0 * (k + 1) as f64;
                a
            })
            .collect(),
    )
}

#[test]
fn test_two_by_two_subgrid_per_frame() {
    let stack = three_by_four();
    let series = aggregate(&Region::new(1, 3, 1, 3), &stack);
    // Sub-grid rows 1..3, cols 1..3: marker + three plain pixels.
    assert_eq!(series, vec![10.0 + 3.0, 20.0 + 6.0, 30.0 + 9.0]);
}

#[test]
fn test_full_region_sums_every_pixel() {
    let stack = three_by_four();
    let series = aggregate(&Region::full(4, 4), &stack);
    for (frame, sum) in stack.iter().zip(&series) {
        assert_relative_eq!(*sum, frame.data.sum());
    }
}

#[test]
fn test_series_length_matches_stack_in_parallel_path() {
    let frames: Vec<Array2<f64>> = (0..12)
        .map(|k| Array2::from_shape_fn((5, 6), |(r, c)| (k * 30 + r * 6 + c) as f64))
        .collect();
    let expected: Vec<f64> = frames
        .iter()
        .map(|a| {
            let mut s = 0.0f64;
            for r in 2..4 {
                for c in 0..3 {
                    s += a[[r, c]];
                }
            }
            s
        })
        .collect();

    let series = aggregate(&Region::new(0, 3, 2, 4), &stack_of(frames));
    assert_eq!(series.len(), 12);
    assert_eq!(series, expected);
}

#[test]
fn test_region_beyond_frame_is_clamped() {
    let stack = three_by_four();
    let clamped = aggregate(&Region::new(2, 99, 2, 99), &stack);
    let exact = aggregate(&Region::new(2, 4, 2, 4), &stack);
    assert_eq!(clamped, exact);
}

#[test]
fn test_spectrum_requires_ready_store() {
    let mut store = FrameStore::new();
    let region = Region::new(0, 1, 0, 1);
    assert!(matches!(
        spectrum(&store, &region, 0),
        Err(FitscubeError::NotReady)
    ));

    let gen = store
        .begin_load(std::path::Path::new("/data"), LoadPolicy::Restart)
        .unwrap();
    assert!(matches!(
        spectrum(&store, &region, 0),
        Err(FitscubeError::NotReady)
    ));

    store.finish(gen, Ok(three_by_four()));
    let report = spectrum(&store, &region, 2).unwrap();
    assert_eq!(report.series, vec![1.0, 2.0, 3.0]);
    assert_eq!(report.frame_index, 2);
}

#[test]
fn test_spectrum_rejects_out_of_range_frame() {
    let mut store = FrameStore::new();
    let gen = store
        .begin_load(std::path::Path::new("/data"), LoadPolicy::Restart)
        .unwrap();
    store.finish(gen, Ok(three_by_four()));
    let err = spectrum(&store, &Region::full(4, 4), 3).unwrap_err();
    assert!(matches!(
        err,
        FitscubeError::FrameIndexOutOfRange { index: 3, total: 3 }
    ));
}

#[test]
fn test_report_serializes_for_plotting() {
    let (dir, _) = write_fits_dir(&[
        build_f32_fits(2, 2, &[1.0, 2.0, 3.0, 4.0]),
        build_f32_fits(2, 2, &[5.0, 6.0, 7.0, 8.0]),
    ]);
    let config = ViewerConfig {
        sort_entries: true,
        ..ViewerConfig::default()
    };
    let stack = load_directory(dir.path(), &config, |_| {}).unwrap();
    let mut store = FrameStore::new();
    let gen = store.begin_load(dir.path(), config.load_policy).unwrap();
    store.finish(gen, Ok(stack));

    let report = spectrum(&store, &Region::new(0, 2, 0, 1), 1).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["x_range"], serde_json::json!([0, 2]));
    assert_eq!(json["y_range"], serde_json::json!([0, 1]));
    assert_eq!(json["frame_index"], 1);
    assert_eq!(json["series"], serde_json::json!([3.0, 11.0]));
}

#[test]
fn test_spectrum_rejects_region_outside_frames() {
    let mut store = FrameStore::new();
    let gen = store
        .begin_load(std::path::Path::new("/data"), LoadPolicy::Restart)
        .unwrap();
    store.finish(gen, Ok(three_by_four()));
    let err = spectrum(&store, &Region::new(6, 9, 0, 2), 0).unwrap_err();
    assert!(matches!(err, FitscubeError::InvalidRegion(_)));
}

#[test]
fn test_int32_sums_are_exact_above_f32_precision() {
    let (dir, _) = write_fits_dir(&[
        build_fits(2, 2, Samples::I32(&[16_777_217, 1, 1, 1])),
        build_fits(2, 2, Samples::I32(&[2_000_000_001, 2_000_000_001, 3, 0])),
    ]);
    let config = ViewerConfig {
        sort_entries: true,
        ..ViewerConfig::default()
    };
    let stack = load_directory(dir.path(), &config, |_| {}).unwrap();

    let series = aggregate(&Region::full(2, 2), &stack);
    assert_eq!(series, vec![16_777_220.0, 4_000_000_005.0]);
}
