// Service exports
pub mod auth;
pub mod backend;
pub mod cache;
pub mod recommendations;
pub mod widgets;

pub use auth::{AuthError, Claims, TokenVerifier};
pub use backend::{BackendClient, BackendError, BackendTables, SignUpResult};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use recommendations::{personalized_destinations, preferences_or_none};
pub use widgets::{WidgetClient, WidgetError};
