// Route exports
pub mod admin;
pub mod auth;
pub mod destinations;
pub mod errors;
pub mod extract;
pub mod posts;
pub mod preferences;
pub mod widgets;

use actix_web::web;
use std::sync::Arc;
use crate::core::Recommender;
use crate::services::{BackendClient, TokenVerifier, WidgetClient};

pub use errors::{handle_json_payload_error, handle_query_payload_error, ApiError};
pub use extract::{AuthenticatedUser, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub widgets: Arc<WidgetClient>,
    pub tokens: Arc<TokenVerifier>,
    pub recommender: Recommender,
    pub admin_secret: Option<String>,
    pub suggestion_limit: usize,
    pub secure_cookies: bool,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(widgets::configure)
            .configure(destinations::configure)
            .configure(preferences::configure)
            .configure(auth::configure)
            .configure(posts::configure)
            .configure(admin::configure),
    );
}
