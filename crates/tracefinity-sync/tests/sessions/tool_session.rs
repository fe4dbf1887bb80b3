use std::sync::Arc;
use std::time::Duration;

use tracefinity_core::store::ToolStore;
use tracefinity_core::{Error, StoreError};
use tracefinity_sync::{SaveStatus, SessionOptions, ToolSession};

use super::support::{seeded_store, settle, SlowToolStore};

#[tokio::test(start_paused = true)]
async fn test_outline_edit_is_saved() {
    let store = seeded_store();
    let tools: Arc<dyn ToolStore> = store.clone();
    let mut session = ToolSession::load(tools, "t1", SessionOptions::default())
        .await
        .unwrap();

    assert!(!session.sync());
    assert!(session.editor_mut().rotate_all(90.0));
    assert!(session.sync());

    settle(200).await;
    assert_eq!(store.tool_write_count(), 1);
    let stored = store.tool("t1").unwrap();
    assert_eq!(stored.outline.points, session.editor().committed().points);
    assert_eq!(session.save_status(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn test_close_flushes_rename() {
    let store = seeded_store();
    let tools: Arc<dyn ToolStore> = store.clone();
    let mut session = ToolSession::load(tools, "t1", SessionOptions::default())
        .await
        .unwrap();

    assert!(session.rename("Spanner"));
    assert_eq!(session.close().await, SaveStatus::Saved);
    assert_eq!(store.tool("t1").unwrap().name, "Spanner");
}

#[tokio::test(start_paused = true)]
async fn test_close_waits_for_write_in_flight() {
    let store = seeded_store();
    let tools: Arc<dyn ToolStore> = Arc::new(SlowToolStore {
        inner: store.clone(),
        delay: Duration::from_millis(2000),
    });
    let mut session = ToolSession::load(tools, "t1", SessionOptions::default())
        .await
        .unwrap();

    assert!(session.rename("Spanner"));
    // the debounce has fired and the write is still on its way
    settle(200).await;
    assert_eq!(session.save_status(), SaveStatus::Saving);
    assert_eq!(store.tool_write_count(), 0);

    assert_eq!(session.close().await, SaveStatus::Saved);
    assert_eq!(store.tool_write_count(), 1);
    assert_eq!(store.tool("t1").unwrap().name, "Spanner");
}

#[tokio::test(start_paused = true)]
async fn test_missing_tool_fails_to_load() {
    let store = seeded_store();
    let tools: Arc<dyn ToolStore> = store.clone();
    let err = ToolSession::load(tools, "nope", SessionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::NotFound { .. })));
}
