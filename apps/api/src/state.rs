use std::sync::Arc;

use crate::assessment::{AssessmentStore, ConfigRegistry};
use crate::auth::{TokenIssuer, UserStore};
use crate::config::Config;
use crate::reports::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Append-only; the only mutable state shared across requests.
    pub users: UserStore,
    pub tokens: TokenIssuer,
    /// Read-only assessment records, looked up by session id.
    pub records: Arc<AssessmentStore>,
    pub configs: Arc<ConfigRegistry>,
    /// Pluggable HTML-to-PDF backend. Default: ChromiumRenderer.
    pub renderer: Arc<dyn PdfRenderer>,
}

#[cfg(test)]
impl AppState {
    /// Bundled records and configs, a stub renderer, and a fast bcrypt cost.
    pub fn for_tests(reports_dir: impl Into<std::path::PathBuf>) -> Self {
        let config = Config::for_tests(reports_dir);
        AppState {
            tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_hours),
            users: UserStore::new(),
            records: Arc::new(AssessmentStore::builtin().expect("bundled records")),
            configs: Arc::new(ConfigRegistry::builtin().expect("bundled configs")),
            renderer: Arc::new(crate::reports::pdf::StubRenderer::default()),
            config,
        }
    }
}
