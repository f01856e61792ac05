use std::sync::Arc;

use falls_store::Storage;

use crate::auth::credentials::CredentialStore;
use crate::auth::session::SessionRegistry;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Documents and image directories.
    pub storage: Arc<Storage>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Where the admin username and password hash live.
    pub credentials: Arc<dyn CredentialStore>,
    /// Sessions issued since startup that have not been logged out.
    pub sessions: Arc<SessionRegistry>,
}
