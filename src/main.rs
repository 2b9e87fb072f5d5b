use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;
use travel_guide::config::{LoggingSettings, Settings};
use travel_guide::core::Recommender;
use travel_guide::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use travel_guide::services::{BackendClient, BackendTables, CacheManager, TokenVerifier, WidgetClient};

/// Initialize the fmt subscriber; LOG_LEVEL and LOG_FORMAT win over the config file
fn init_tracing(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.compact().init(),
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            return Err(startup_error("Failed to load configuration", e));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Travel Guide service...");

    if settings.backend.url.is_empty() {
        warn!("No backend URL configured; data endpoints will fail until SUPABASE_URL is set");
    }
    if settings.backend.jwt_secret.is_empty() {
        warn!("No JWT secret configured; authenticated endpoints will reject every request");
    }
    if settings.admin.secret.as_deref().map_or(true, str::is_empty) {
        warn!("No admin secret configured; admin writes are open");
    }

    let tables = BackendTables {
        destinations: settings.tables.destinations.clone(),
        user_preferences: settings.tables.user_preferences.clone(),
        posts: settings.tables.posts.clone(),
    };

    let backend = Arc::new(
        BackendClient::new(
            settings.backend.url.clone(),
            settings.backend.service_key.clone(),
            settings.backend.anon_key.clone(),
            tables,
            Duration::from_secs(settings.backend.timeout_secs.unwrap_or(10)),
        )
        .map_err(|e| startup_error("Failed to build backend client", e))?,
    );

    info!("Backend client initialized");

    // Widget cache: Redis when reachable, in-process otherwise
    let l1_cache_size = settings.cache.l1_cache_size;
    let cache = match settings.cache.redis_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => match CacheManager::with_redis(url, l1_cache_size).await {
            Ok(cache) => {
                info!("Cache manager initialized with Redis (L1: {} entries)", l1_cache_size);
                cache
            }
            Err(e) => {
                warn!("Failed to connect to Redis ({}), using in-memory cache only", e);
                CacheManager::in_memory(l1_cache_size)
            }
        },
        None => {
            info!("Cache manager initialized in memory (L1: {} entries)", l1_cache_size);
            CacheManager::in_memory(l1_cache_size)
        }
    };

    let widgets = Arc::new(
        WidgetClient::new(settings.widgets.clone(), Arc::new(cache))
            .map_err(|e| startup_error("Failed to build widget client", e))?,
    );

    let tokens = Arc::new(TokenVerifier::new(&settings.backend.jwt_secret));

    let recommender = Recommender::new(settings.scoring.clone());

    info!(
        "Recommender initialized with {} style rules and {} interest keyword sets",
        recommender.rules().styles.len(),
        recommender.rules().interests.len()
    );

    // Build application state
    let app_state = AppState {
        backend,
        widgets,
        tokens,
        recommender,
        admin_secret: settings.admin.secret.clone(),
        suggestion_limit: settings.recommendations.suggestion_limit,
        secure_cookies: settings.auth.secure_cookies,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
