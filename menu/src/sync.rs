//! # Synchronization
//!
//! One fetch-decode-replace cycle against the remote menu source, plus the
//! once-per-session gate the menu view drives on first display.

use std::sync::RwLock;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::{error::SyncError, model::parse_menu, store::MenuStore};

/// Load state of the menu view session. Failure falls back to whatever
/// state the store was in before the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading,
    Populated,
}

/// Runs a single fetch-decode-replace cycle. Any failure leaves the store
/// untouched and no retry is attempted.
pub async fn sync_once(client: &Client, url: &str, store: &MenuStore) -> Result<usize, SyncError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Status(status));
    }

    let body = response.bytes().await?;
    let dishes = parse_menu(&body)?;
    let count = dishes.len();

    store.replace_all(dishes)?;
    info!("menu synchronized, {count} dishes");

    Ok(count)
}

/// Gate that runs the cycle at most once per session. The first caller
/// performs the fetch, concurrent callers await it, later callers get the
/// recorded outcome without touching the network again.
pub struct Synchronizer {
    outcome: OnceCell<Result<usize, SyncError>>,
    state: RwLock<LoadState>,
}

impl Synchronizer {
    pub fn new() -> Self {
        Self {
            outcome: OnceCell::new(),
            state: RwLock::new(LoadState::Empty),
        }
    }

    pub fn state(&self) -> LoadState {
        *self.state.read().expect("state lock poisoned")
    }

    pub async fn ensure(
        &self,
        client: &Client,
        url: &str,
        store: &MenuStore,
    ) -> &Result<usize, SyncError> {
        self.outcome
            .get_or_init(|| async {
                let prior = if store.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Populated
                };
                self.set_state(LoadState::Loading);

                let result = sync_once(client, url, store).await;

                match &result {
                    Ok(_) => self.set_state(LoadState::Populated),
                    Err(e) => {
                        warn!("menu sync failed: {e}");
                        self.set_state(prior);
                    }
                }

                result
            })
            .await
    }

    fn set_state(&self, next: LoadState) {
        *self.state.write().expect("state lock poisoned") = next;
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}
