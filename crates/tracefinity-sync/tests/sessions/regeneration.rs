use std::time::Duration;

use tracefinity_core::model::BinConfig;
use tracefinity_designer::SmoothingTable;
use tracefinity_sync::{Fingerprint, RegenerationOutput, RegenerationPipeline, RunOutcome};

use super::support::{settle, FakeService};

fn fingerprint(grid_x: u32) -> Fingerprint {
    let config = BinConfig {
        grid_x,
        ..BinConfig::default()
    };
    Fingerprint::compute(&config, &[], &[], &SmoothingTable::new()).unwrap()
}

fn pipeline(service: std::sync::Arc<FakeService>) -> RegenerationPipeline {
    RegenerationPipeline::new("b1", service, Duration::from_millis(1000))
}

fn ready_url(output: &RegenerationOutput) -> Option<&str> {
    match output {
        RegenerationOutput::Ready(response) => Some(response.stl_url.as_str()),
        _ => None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_new_request_cancels_in_flight() {
    let service = FakeService::new(Duration::from_millis(3000));
    let regen = pipeline(service.clone());

    regen.request(fingerprint(2), 1);
    settle(1100).await;
    assert!(regen.is_generating());
    assert!(regen.output().is_generating());

    regen.request(fingerprint(3), 1);
    // the first request would have answered at 4000 ms
    settle(3400).await;
    assert_eq!(service.calls(), 2);
    assert!(regen.output().is_generating());

    settle(700).await;
    assert_eq!(ready_url(&regen.output()), Some("/files/b1/2.stl"));
    assert!(!regen.is_generating());
}

#[tokio::test(start_paused = true)]
async fn test_identical_fingerprint_is_skipped() {
    let service = FakeService::new(Duration::from_millis(10));
    let regen = pipeline(service.clone());

    regen.request(fingerprint(2), 1);
    settle(1100).await;
    assert_eq!(service.calls(), 1);
    assert_eq!(ready_url(&regen.output()), Some("/files/b1/1.stl"));

    regen.request(fingerprint(2), 1);
    settle(1100).await;
    assert_eq!(service.calls(), 1);
    assert_eq!(
        regen.run_now(fingerprint(2), 1).await,
        RunOutcome::SkippedUnchanged
    );
}

#[tokio::test(start_paused = true)]
async fn test_change_and_revert_within_debounce_is_skipped() {
    let service = FakeService::new(Duration::from_millis(10));
    let regen = pipeline(service.clone());

    assert_eq!(regen.run_now(fingerprint(2), 1).await, RunOutcome::Published);
    regen.request(fingerprint(3), 1);
    settle(100).await;
    regen.request(fingerprint(2), 1);
    settle(1200).await;

    assert_eq!(service.calls(), 1);
    assert!(!regen.is_pending());
    assert_eq!(regen.last_fingerprint(), Some(fingerprint(2)));
}

#[tokio::test(start_paused = true)]
async fn test_empty_bin_is_not_generated() {
    let service = FakeService::new(Duration::from_millis(10));
    let regen = pipeline(service.clone());

    assert_eq!(regen.run_now(fingerprint(2), 0).await, RunOutcome::SkippedEmpty);
    assert_eq!(service.calls(), 0);
    assert_eq!(regen.output(), RegenerationOutput::Idle);
    assert_eq!(regen.last_fingerprint(), None);
}

#[tokio::test(start_paused = true)]
async fn test_failure_is_reported() {
    let service = FakeService::failing(Duration::from_millis(10));
    let regen = pipeline(service.clone());

    assert_eq!(regen.run_now(fingerprint(2), 1).await, RunOutcome::Failed);
    match regen.output() {
        RegenerationOutput::Failed(message) => assert!(message.contains("mesh boolean failed")),
        other => panic!("unexpected output {other:?}"),
    }
    assert_eq!(regen.last_fingerprint(), None);
    assert_eq!(regen.run_now(fingerprint(2), 1).await, RunOutcome::Failed);
    assert_eq!(service.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_without_error() {
    let service = FakeService::new(Duration::from_millis(3000));
    let regen = pipeline(service.clone());
    let mut updates = regen.subscribe();

    regen.request(fingerprint(2), 1);
    settle(1100).await;
    assert!(regen.is_generating());
    let _ = updates.borrow_and_update();

    regen.shutdown();
    settle(4000).await;
    assert!(!regen.is_generating());
    assert!(!updates.has_changed().unwrap());
    assert!(regen.output().is_generating());
}
