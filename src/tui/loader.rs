// Background task that reads the signed-in user's deadlines from storage.
use crate::store::EventStore;
use crate::tui::action::{Action, AppEvent};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

pub async fn run_loader_actor(
    store: Arc<dyn EventStore>,
    owner_id: String,
    limit: usize,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    // Initial load, then one fetch per reload request.
    load(&store, &owner_id, limit, &event_tx).await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,
            Action::Reload => load(&store, &owner_id, limit, &event_tx).await,
        }
    }
}

async fn load(
    store: &Arc<dyn EventStore>,
    owner_id: &str,
    limit: usize,
    event_tx: &Sender<AppEvent>,
) {
    let store = Arc::clone(store);
    let owner = owner_id.to_string();
    let result = tokio::task::spawn_blocking(move || store.fetch_events(&owner, limit)).await;

    let event = match result {
        Ok(Ok(events)) => {
            log::debug!("Loaded {} event(s) for the dashboard", events.len());
            AppEvent::EventsLoaded(events)
        }
        Ok(Err(e)) => {
            log::error!("Dashboard fetch failed: {:#}", e);
            AppEvent::Error(e.to_string())
        }
        Err(e) => AppEvent::Error(format!("loader task failed: {}", e)),
    };
    let _ = event_tx.send(event).await;
}
