use std::sync::Arc;

use crate::config::ServerConfig;

/// Handler state. Both fields are reference-counted, so cloning per request
/// is cheap. `config` also drives the middleware built by
/// [`build_app_router`](crate::router::build_app_router).
#[derive(Clone)]
pub struct AppState {
    pub pool: archmap_db::DbPool,
    pub config: Arc<ServerConfig>,
}
