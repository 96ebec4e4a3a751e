use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    store::{Catalog, ChatBoard},
};

pub type SharedCatalog = Arc<RwLock<Catalog>>;
pub type SharedChats = Arc<RwLock<ChatBoard>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
    pub chats: SharedChats,
    pub config: Config,
}

impl AppState {
    /// Fresh in-memory state seeded with the default subjects.
    pub fn new(config: Config) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Catalog::new(&config))),
            chats: Arc::new(RwLock::new(ChatBoard::new())),
            config,
        }
    }
}

impl FromRef<AppState> for SharedCatalog {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for SharedChats {
    fn from_ref(state: &AppState) -> Self {
        state.chats.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
