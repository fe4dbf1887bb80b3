use std::sync::Arc;
use std::time::Duration;

use tracefinity_core::model::{Point, Tool, ToolPatch};
use tracefinity_core::store::{BinStore, RegenerationService, ToolStore};
use tracefinity_core::{Error, MemoryStore, ModelError};
use tracefinity_sync::{BinSession, RegenerationOutput, SaveStatus, SessionOptions};

use super::support::{seeded_store, settle, FakeService};

async fn open(store: &Arc<MemoryStore>, service: &Arc<FakeService>) -> BinSession {
    let bins: Arc<dyn BinStore> = store.clone();
    let tools: Arc<dyn ToolStore> = store.clone();
    let service: Arc<dyn RegenerationService> = service.clone();
    BinSession::load(bins, tools, service, "b1", SessionOptions::default())
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_insert_saves_and_regenerates() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;
    assert_eq!(session.name(), Some("Drawer"));

    session.insert_tool("t1").unwrap();
    assert_eq!(store.bin_write_count(), 0);

    settle(200).await;
    assert_eq!(store.bin_write_count(), 1);
    assert_eq!(store.bin("b1").unwrap().placed_tools.len(), 1);
    assert_eq!(session.save_status(), SaveStatus::Saved);
    assert_eq!(service.calls(), 0);

    settle(1000).await;
    assert_eq!(service.calls(), 1);
    assert!(matches!(
        session.regeneration_output(),
        RegenerationOutput::Ready(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_empty_bin_is_not_regenerated_on_load() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let session = open(&store, &service).await;

    settle(1500).await;
    assert_eq!(service.calls(), 0);
    assert_eq!(session.regeneration_output(), RegenerationOutput::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_insert_unknown_tool_is_an_error() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    let err = session.insert_tool("missing").unwrap_err();
    assert!(matches!(err, Error::Model(ModelError::UnknownId { .. })));
    assert!(session.editor().placed_tools().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_insert_degenerate_tool_is_refused() {
    let store = seeded_store();
    store.insert_tool(Tool::new(
        "flat",
        "Flat",
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
    ));
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    let err = session.insert_tool("flat").unwrap_err();
    assert!(matches!(
        err,
        Error::Model(ModelError::DegenerateRing { points: 2 })
    ));
    assert!(session.editor().placed_tools().is_empty());

    settle(200).await;
    assert_eq!(store.bin_write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_grown_grid_is_persisted() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    let placement = session.insert_tool("t2").unwrap();
    assert_eq!((placement.grid_x, placement.grid_y), (3, 2));

    settle(200).await;
    let stored = store.bin("b1").unwrap();
    assert_eq!(stored.bin_config.grid_x, 3);
    assert_eq!(stored.bin_config.grid_y, 2);
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_edits_writes_once() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    for name in ["A", "B", "C", "D"] {
        assert!(session.rename(name).unwrap());
        settle(50).await;
    }
    settle(200).await;
    assert_eq!(store.bin_write_count(), 1);
    assert_eq!(store.bin("b1").unwrap().name.as_deref(), Some("D"));
    assert!(!session.sync().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_close_flushes_pending_save() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    session.insert_tool("t1").unwrap();
    assert!(session.saver().is_pending());

    let status = session.close().await.unwrap();
    assert_eq!(status, SaveStatus::Saved);
    assert_eq!(store.bin_write_count(), 1);
    assert_eq!(store.bin("b1").unwrap().placed_tools.len(), 1);

    settle(2000).await;
    assert_eq!(service.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_smoothed_writes_through() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    assert!(session.toggle_smoothed("t1").await.unwrap());
    assert_eq!(store.tool_write_count(), 1);
    assert!(store.tool("t1").unwrap().smoothed);
    assert_eq!(session.smoothing().render_level("t1"), Some(0.5));

    assert!(!session.toggle_smoothed("t1").await.unwrap());
    assert!(!store.tool("t1").unwrap().smoothed);
}

#[tokio::test(start_paused = true)]
async fn test_smooth_level_writes_are_debounced() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    for level in [0.2, 0.4, 0.9] {
        session.set_smooth_level("t1", level).unwrap();
        settle(100).await;
    }
    assert_eq!(store.tool_write_count(), 0);
    assert_eq!(session.smoothing().level("t1"), 0.9);

    settle(400).await;
    assert_eq!(store.tool_write_count(), 1);
    assert_eq!(store.tool("t1").unwrap().smooth_level, 0.9);
}

#[tokio::test(start_paused = true)]
async fn test_smoothing_change_triggers_regeneration() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    session.insert_tool("t1").unwrap();
    settle(1200).await;
    assert_eq!(service.calls(), 1);

    session.toggle_smoothed("t1").await.unwrap();
    settle(1200).await;
    assert_eq!(service.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_library_resyncs_placements() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    session.insert_tool("t1").unwrap();
    settle(200).await;

    let patch = ToolPatch {
        name: Some("Renamed".into()),
        ..ToolPatch::default()
    };
    store.update_tool("t1", patch).await.unwrap();

    assert!(session.refresh_library().await.unwrap());
    assert_eq!(session.editor().placed_tools()[0].name, "Renamed");

    settle(200).await;
    assert_eq!(store.bin("b1").unwrap().placed_tools[0].name, "Renamed");
    assert!(!session.refresh_library().await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_refresh_with_new_smoothing_regenerates_without_saving() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    session.insert_tool("t1").unwrap();
    settle(1200).await;
    assert_eq!(service.calls(), 1);
    assert_eq!(store.bin_write_count(), 1);

    let patch = ToolPatch {
        smoothed: Some(true),
        ..ToolPatch::default()
    };
    store.update_tool("t1", patch).await.unwrap();

    assert!(!session.refresh_library().await.unwrap());
    assert!(session.smoothing().is_smoothed("t1"));
    settle(1200).await;
    assert_eq!(service.calls(), 2);
    assert_eq!(store.bin_write_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_render_svg_includes_placements() {
    let store = seeded_store();
    let service = FakeService::new(Duration::from_millis(50));
    let mut session = open(&store, &service).await;

    session.insert_tool("t1").unwrap();
    let svg = session.render_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("evenodd"));
}
