use std::sync::Arc;

use menu::{session::Session, store::MenuStore, sync::Synchronizer};
use reqwest::Client;

use super::config::Config;

pub struct State {
    pub config: Config,
    pub store: MenuStore,
    pub session: Session,
    pub client: Client,
    pub sync: Synchronizer,
}

impl State {
    pub fn new() -> Arc<Self> {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Arc<Self> {
        let store =
            MenuStore::open(config.data_dir.join("menu.json")).expect("Menu store unavailable!");
        let session =
            Session::open(config.data_dir.join("session.json")).expect("Session unavailable!");

        Arc::new(Self {
            config,
            store,
            session,
            client: Client::new(),
            sync: Synchronizer::new(),
        })
    }
}
