//! # Live tests against a running research service
//!
//! Skipped (not failed) when no service URL is configured. Ignored by default
//! because they start real tasks.
//!
//! ## Required environment variables
//!
//! ```bash
//! DEEP_API__BASE_URL=http://localhost:8000
//! ```
//!
//! ## Run
//!
//! ```bash
//! cargo test -p deep-client --test live_service -- --ignored --nocapture
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use deep_client::{OnDone, ResearchClient};
use deep_config::ApiConfig;
use deep_core::entities::ProgressEvent;

fn live_client() -> Option<ResearchClient> {
    let workspace_env = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join(".env"));
    if let Some(env_path) = workspace_env {
        let _ = dotenvy::from_path(&env_path);
    }

    let base_url = std::env::var("DEEP_API__BASE_URL").ok()?;
    if base_url.is_empty() {
        return None;
    }
    let config = ApiConfig {
        base_url,
        ..ApiConfig::default()
    };
    config.validate().ok()?;
    ResearchClient::new(&config).ok()
}

#[tokio::test]
#[ignore = "starts a task on a live research service"]
async fn live_task_streams_to_a_terminal_event() {
    let Some(client) = live_client() else {
        eprintln!("SKIP: DEEP_API__BASE_URL not set");
        return;
    };

    let handle = client.start("What is quantum computing?").await.unwrap();
    let info = client.get_status(&handle.task_id).await.unwrap();
    assert_eq!(info.id, handle.task_id);

    let events = Arc::new(Mutex::new(Vec::<ProgressEvent>::new()));
    let sink = Arc::clone(&events);
    let (done_tx, done_rx) = tokio::sync::oneshot::channel();
    let on_done: OnDone = Box::new(move || {
        let _ = done_tx.send(());
    });
    let subscription = client.subscribe(
        &handle.task_id,
        move |event| sink.lock().unwrap().push(event),
        Some(on_done),
    );

    tokio::time::timeout(Duration::from_secs(300), done_rx)
        .await
        .expect("task should finish within five minutes")
        .unwrap();
    subscription.finished().await;

    let events = events.lock().unwrap();
    let last = events.last().expect("at least one event");
    assert!(last.is_terminal(), "last event was {:?}", last.event_type);
}

#[tokio::test]
#[ignore = "starts a task on a live research service"]
async fn live_cancel_is_accepted_or_ignored() {
    let Some(client) = live_client() else {
        eprintln!("SKIP: DEEP_API__BASE_URL not set");
        return;
    };

    let handle = client.start("Summarize the history of the transistor").await.unwrap();
    client.cancel(&handle.task_id).await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    let info = client.get_status(&handle.task_id).await.unwrap();
    assert_eq!(info.id, handle.task_id);
}
