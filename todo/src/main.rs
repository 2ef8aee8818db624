//! Todo demo binary
//!
//! Drives the todo feature against the real remote collection API.
//! Configuration comes from the environment: `TODO_API_URL` names the API
//! base URL and `TODO_OWNER_ID` the user whose records are managed.

use reflow_api::HttpTodoApi;
use reflow_runtime::Store;
use reflow_todo::{Filter, TodoAction, TodoEnvironment, TodoReducer, TodoState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reflow_todo=debug,reflow_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api = HttpTodoApi::from_env()?;
    let owner_id: i64 = std::env::var("TODO_OWNER_ID")
        .map_err(|_| "Missing TODO_OWNER_ID environment variable")?
        .parse()?;

    let env = TodoEnvironment::new(Arc::new(api), owner_id);
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);

    // Initial load
    let mut handle = store.send(TodoAction::Load).await?;
    handle.wait().await;

    let (total, active) = store.state(|s| (s.todos.len(), s.active_count())).await;
    println!("{total} todos loaded, {active} items left");

    // Create a todo
    store
        .send(TodoAction::TitleChanged("Try reflow".to_string()))
        .await?;
    let mut handle = store.send(TodoAction::Submit).await?;
    handle.wait().await;

    let total = store.state(|s| s.todos.len()).await;
    println!("{total} todos after submit");

    // Show only active todos
    store.send(TodoAction::SetFilter(Filter::Active)).await?;
    let visible = store
        .state(|s| {
            s.visible_todos()
                .iter()
                .map(|t| t.title.clone())
                .collect::<Vec<_>>()
        })
        .await;
    for title in visible {
        println!("  [ ] {title}");
    }

    // Clean up anything completed
    let mut handle = store.send(TodoAction::ClearCompleted).await?;
    handle.wait().await;

    if let Some(notice) = store.state(|s| s.notice.clone()).await {
        println!("notice: {}", notice.message);
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
