use std::path::Path;

use fitscube_core::config::LoadPolicy;
use fitscube_core::error::{FailureKind, FitscubeError};
use fitscube_core::frame::FrameStack;
use fitscube_core::loader::LoadFailure;
use fitscube_core::store::{FrameStore, LoadState};

#[test]
fn test_store_starts_empty_and_not_ready() {
    let store = FrameStore::new();
    assert!(matches!(store.state(), LoadState::Empty));
    assert!(matches!(store.ready(), Err(FitscubeError::NotReady)));
    assert_eq!(store.frame_count(), None);
}

#[test]
fn test_reject_policy_refuses_second_load() {
    let mut store = FrameStore::new();
    store.begin_load(Path::new("/a"), LoadPolicy::Reject).unwrap();
    let err = store.begin_load(Path::new("/b"), LoadPolicy::Reject).unwrap_err();
    assert!(matches!(err, FitscubeError::LoadInProgress));
    assert_eq!(store.directory(), Some(Path::new("/a")));
}

#[test]
fn test_restart_policy_drops_stale_results() {
    let mut store = FrameStore::new();
    let first = store.begin_load(Path::new("/a"), LoadPolicy::Restart).unwrap();
    let second = store.begin_load(Path::new("/b"), LoadPolicy::Restart).unwrap();
    assert!(second > first);

    assert!(!store.finish(first, Ok(FrameStack::default())));
    assert!(store.is_loading());

    assert!(store.finish(second, Ok(FrameStack::default())));
    assert!(store.is_ready());
    assert_eq!(store.directory(), Some(Path::new("/b")));
}

#[test]
fn test_failed_load_is_not_ready() {
    let mut store = FrameStore::new();
    let gen = store.begin_load(Path::new("/a"), LoadPolicy::Restart).unwrap();
    let failure = LoadFailure::from_error(
        &FitscubeError::InvalidFits("missing END card".into()),
        Some(Path::new("/a/x.fits")),
    );
    store.finish(gen, Err(failure));

    match store.state() {
        LoadState::Failed(f) => {
            assert_eq!(f.kind, FailureKind::InvalidFits);
            assert!(f.message.contains("x.fits"));
        }
        other => panic!("unexpected state {}", other.label()),
    }
    assert!(store.ready().is_err());
}

#[test]
fn test_late_result_after_completion_is_ignored() {
    let mut store = FrameStore::new();
    let gen = store.begin_load(Path::new("/a"), LoadPolicy::Restart).unwrap();
    assert!(store.finish(gen, Ok(FrameStack::default())));
    assert!(!store.finish(gen, Ok(FrameStack::default())));
}
